use crate::prompt::Answers;
use indexmap::IndexMap;
use miette::Diagnostic;
use tera::{Context, Tera};
use thiserror::Error;

#[derive(Debug, Error, Diagnostic)]
pub enum BlueprintError {
    #[error("Error occurred attempting to render template for '{path}'")]
    #[diagnostic(code(expresso::blueprint::render), help("Review the template entry"))]
    Render {
        path: String,
        #[source]
        source: tera::Error,
    },
}

/// Which flavor of project skeleton to emit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Variant {
    JavaScript,
    TypeScript,
}

impl Variant {
    pub fn from_answers(answers: &Answers) -> Self {
        if answers.typed {
            Self::TypeScript
        } else {
            Self::JavaScript
        }
    }
}

/// The full set of entries for one scaffold run: relative path mapped to
/// rendered content, in insertion order. Creation order is map order.
/// Paths ending in a separator are directory entries.
#[derive(Debug, Clone)]
pub struct Blueprint {
    pub entries: IndexMap<String, String>,
}

/// Renders the template set for the chosen variant, hydrating each entry
/// with the prompt answers.
pub fn render(answers: &Answers) -> Result<Blueprint, BlueprintError> {
    let mut tera = Tera::default();

    let mut context = Context::new();
    context.insert("project", &answers.project);
    context.insert("author", &answers.author);
    context.insert("repository", &answers.repository);

    let mut entries = IndexMap::new();

    for (path, template) in entry_templates(Variant::from_answers(answers)) {
        let rendered =
            tera.render_str(template, &context)
                .map_err(|error| BlueprintError::Render {
                    path: (*path).to_string(),
                    source: error,
                })?;

        entries.insert((*path).to_string(), rendered);
    }

    Ok(Blueprint { entries })
}

fn entry_templates(variant: Variant) -> &'static [(&'static str, &'static str)] {
    match variant {
        Variant::JavaScript => JS_ENTRIES,
        Variant::TypeScript => TS_ENTRIES,
    }
}

const JS_ENTRIES: &[(&str, &str)] = &[
    ("package.json", JS_PACKAGE_JSON),
    ("server.js", JS_SERVER),
    ("routes/index.js", JS_ROUTER),
    ("controllers/index.js", JS_CONTROLLER),
    ("models/index.js", JS_MODEL),
    ("middlewares/errorHandlers.js", JS_ERROR_HANDLERS),
    ("db/setup.sql", DB_SETUP),
    (".env.development", ENV_DEVELOPMENT),
    (".env.test", ENV_TEST),
    (".env.production", ENV_PRODUCTION),
    (".env.example", ENV_EXAMPLE),
    ("endpoints.md", ENDPOINTS),
    ("public/", ""),
];

const TS_ENTRIES: &[(&str, &str)] = &[
    ("package.json", TS_PACKAGE_JSON),
    ("tsconfig.json", TSCONFIG),
    ("server.ts", TS_SERVER),
    ("routes/index.ts", TS_ROUTER),
    ("controllers/index.ts", TS_CONTROLLER),
    ("models/index.ts", TS_MODEL),
    ("middlewares/errorHandlers.ts", TS_ERROR_HANDLERS),
    ("db/setup.sql", DB_SETUP),
    (".env.development", ENV_DEVELOPMENT),
    (".env.test", ENV_TEST),
    (".env.production", ENV_PRODUCTION),
    (".env.example", ENV_EXAMPLE),
    ("endpoints.md", ENDPOINTS),
    ("public/", ""),
];

const JS_PACKAGE_JSON: &str = r#"{
  "name": "{{ project }}",
  "version": "0.1.0",
  "description": "{{ project }} API",
  "author": "{{ author }}",
  "license": "ISC",
  "main": "server.js",
  "scripts": {
    "start": "node server.js",
    "dev": "NODE_ENV=development node --watch server.js",
    "test": "NODE_ENV=test node --test"
  },{% if repository %}
  "repository": {
    "type": "git",
    "url": "{{ repository }}"
  },{% endif %}
  "dependencies": {
    "dotenv": "^16.4.5",
    "express": "^4.19.2",
    "pg": "^8.12.0"
  }
}
"#;

const TS_PACKAGE_JSON: &str = r#"{
  "name": "{{ project }}",
  "version": "0.1.0",
  "description": "{{ project }} API",
  "author": "{{ author }}",
  "license": "ISC",
  "main": "dist/server.js",
  "scripts": {
    "build": "tsc",
    "start": "node dist/server.js",
    "dev": "NODE_ENV=development ts-node server.ts",
    "test": "NODE_ENV=test node --test"
  },{% if repository %}
  "repository": {
    "type": "git",
    "url": "{{ repository }}"
  },{% endif %}
  "dependencies": {
    "dotenv": "^16.4.5",
    "express": "^4.19.2",
    "pg": "^8.12.0"
  }
}
"#;

const TSCONFIG: &str = r#"{
  "compilerOptions": {
    "target": "ES2020",
    "module": "commonjs",
    "rootDir": ".",
    "outDir": "dist",
    "strict": true,
    "esModuleInterop": true,
    "skipLibCheck": true
  },
  "include": ["server.ts", "routes", "controllers", "models", "middlewares"]
}
"#;

const JS_SERVER: &str = r#"require('dotenv').config({ path: `.env.${process.env.NODE_ENV || 'development'}` });
const express = require('express');

const router = require('./routes');
const {
  inputErrorHandler,
  databaseErrorHandler,
  customErrorHandler,
  serverErrorHandler,
} = require('./middlewares/errorHandlers');

const app = express();
const port = process.env.PORT || 3000;

app.use(express.json());
app.use(express.static('public'));
app.use('/api', router);

app.use(inputErrorHandler);
app.use(databaseErrorHandler);
app.use(customErrorHandler);
app.use(serverErrorHandler);

app.listen(port, () => {
  console.log(`{{ project }} listening on port ${port}`);
});
"#;

const TS_SERVER: &str = r#"import dotenv from 'dotenv';
dotenv.config({ path: `.env.${process.env.NODE_ENV ?? 'development'}` });

import express from 'express';

import router from './routes';
import {
  inputErrorHandler,
  databaseErrorHandler,
  customErrorHandler,
  serverErrorHandler,
} from './middlewares/errorHandlers';

const app = express();
const port = process.env.PORT ?? 3000;

app.use(express.json());
app.use(express.static('public'));
app.use('/api', router);

app.use(inputErrorHandler);
app.use(databaseErrorHandler);
app.use(customErrorHandler);
app.use(serverErrorHandler);

app.listen(port, () => {
  console.log(`{{ project }} listening on port ${port}`);
});
"#;

const JS_ROUTER: &str = r#"const { Router } = require('express');
const controllers = require('../controllers');

const router = Router();

router.get('/health', controllers.health);
router.get('/items', controllers.listItems);
router.post('/items', controllers.createItem);

module.exports = router;
"#;

const TS_ROUTER: &str = r#"import { Router } from 'express';
import * as controllers from '../controllers';

const router = Router();

router.get('/health', controllers.health);
router.get('/items', controllers.listItems);
router.post('/items', controllers.createItem);

export default router;
"#;

const JS_CONTROLLER: &str = r#"const models = require('../models');

const health = (req, res) => {
  res.json({ status: 'ok' });
};

const listItems = async (req, res, next) => {
  try {
    const items = await models.allItems();
    res.json(items);
  } catch (error) {
    next(error);
  }
};

const createItem = async (req, res, next) => {
  try {
    const item = await models.insertItem(req.body);
    res.status(201).json(item);
  } catch (error) {
    next(error);
  }
};

module.exports = { health, listItems, createItem };
"#;

const TS_CONTROLLER: &str = r#"import { RequestHandler } from 'express';

import * as models from '../models';

export const health: RequestHandler = (req, res) => {
  res.json({ status: 'ok' });
};

export const listItems: RequestHandler = async (req, res, next) => {
  try {
    const items = await models.allItems();
    res.json(items);
  } catch (error) {
    next(error);
  }
};

export const createItem: RequestHandler = async (req, res, next) => {
  try {
    const item = await models.insertItem(req.body);
    res.status(201).json(item);
  } catch (error) {
    next(error);
  }
};
"#;

const JS_MODEL: &str = r#"const { Pool } = require('pg');

const pool = new Pool({
  connectionString: process.env.DATABASE_URL,
});

const allItems = async () => {
  const { rows } = await pool.query('SELECT * FROM items ORDER BY id');
  return rows;
};

const insertItem = async ({ name }) => {
  const { rows } = await pool.query(
    'INSERT INTO items (name) VALUES ($1) RETURNING *',
    [name]
  );
  return rows[0];
};

module.exports = { allItems, insertItem };
"#;

const TS_MODEL: &str = r#"import { Pool } from 'pg';

const pool = new Pool({
  connectionString: process.env.DATABASE_URL,
});

export interface Item {
  id: number;
  name: string;
}

export const allItems = async (): Promise<Item[]> => {
  const { rows } = await pool.query('SELECT * FROM items ORDER BY id');
  return rows;
};

export const insertItem = async ({ name }: { name: string }): Promise<Item> => {
  const { rows } = await pool.query(
    'INSERT INTO items (name) VALUES ($1) RETURNING *',
    [name]
  );
  return rows[0];
};
"#;

const JS_ERROR_HANDLERS: &str = r#"const inputErrorHandler = (err, req, res, next) => {
  if (err.name === 'ValidationError') {
    return res.status(400).json({ error: err.message });
  }
  next(err);
};

const databaseErrorHandler = (err, req, res, next) => {
  if (err.code && err.code.startsWith('23')) {
    return res.status(409).json({ error: 'database constraint violated' });
  }
  next(err);
};

const customErrorHandler = (err, req, res, next) => {
  if (err.status) {
    return res.status(err.status).json({ error: err.message });
  }
  next(err);
};

const serverErrorHandler = (err, req, res, next) => {
  console.error(err);
  res.status(500).json({ error: 'internal server error' });
};

module.exports = {
  inputErrorHandler,
  databaseErrorHandler,
  customErrorHandler,
  serverErrorHandler,
};
"#;

const TS_ERROR_HANDLERS: &str = r#"import { ErrorRequestHandler } from 'express';

export const inputErrorHandler: ErrorRequestHandler = (err, req, res, next) => {
  if (err.name === 'ValidationError') {
    return res.status(400).json({ error: err.message });
  }
  next(err);
};

export const databaseErrorHandler: ErrorRequestHandler = (err, req, res, next) => {
  if (err.code && err.code.startsWith('23')) {
    return res.status(409).json({ error: 'database constraint violated' });
  }
  next(err);
};

export const customErrorHandler: ErrorRequestHandler = (err, req, res, next) => {
  if (err.status) {
    return res.status(err.status).json({ error: err.message });
  }
  next(err);
};

export const serverErrorHandler: ErrorRequestHandler = (err, req, res, next) => {
  console.error(err);
  res.status(500).json({ error: 'internal server error' });
};
"#;

const DB_SETUP: &str = r#"DROP DATABASE IF EXISTS {{ project | replace(from="-", to="_") }}_development;
CREATE DATABASE {{ project | replace(from="-", to="_") }}_development;

DROP DATABASE IF EXISTS {{ project | replace(from="-", to="_") }}_test;
CREATE DATABASE {{ project | replace(from="-", to="_") }}_test;

\c {{ project | replace(from="-", to="_") }}_development

CREATE TABLE items (
  id SERIAL PRIMARY KEY,
  name TEXT NOT NULL
);
"#;

const ENV_DEVELOPMENT: &str = r#"NODE_ENV=development
PORT=3000
DATABASE_URL=postgres://localhost:5432/{{ project | replace(from="-", to="_") }}_development
"#;

const ENV_TEST: &str = r#"NODE_ENV=test
PORT=3001
DATABASE_URL=postgres://localhost:5432/{{ project | replace(from="-", to="_") }}_test
"#;

const ENV_PRODUCTION: &str = r#"NODE_ENV=production
PORT=8080
DATABASE_URL=postgres://localhost:5432/{{ project | replace(from="-", to="_") }}
"#;

const ENV_EXAMPLE: &str = r#"# development
NODE_ENV=development
PORT=3000
DATABASE_URL=postgres://localhost:5432/{{ project | replace(from="-", to="_") }}_development

# test
NODE_ENV=test
PORT=3001
DATABASE_URL=postgres://localhost:5432/{{ project | replace(from="-", to="_") }}_test

# production
NODE_ENV=production
PORT=8080
DATABASE_URL=postgres://localhost:5432/{{ project | replace(from="-", to="_") }}
"#;

const ENDPOINTS: &str = r#"# {{ project }} endpoints

| method | path        | description    |
| ------ | ----------- | -------------- |
| GET    | /api/health | liveness probe |
| GET    | /api/items  | list items     |
| POST   | /api/items  | create an item |
"#;

#[cfg(test)]
mod tests {
    use super::*;

    fn answers(typed: bool, repository: Option<&str>) -> Answers {
        Answers {
            project: "my-api".to_string(),
            author: "ada".to_string(),
            repository: repository.map(str::to_string),
            typed,
        }
    }

    #[test]
    fn manifest_comes_first_and_order_is_stable() {
        let blueprint = render(&answers(false, None)).unwrap();

        let paths: Vec<&String> = blueprint.entries.keys().collect();

        assert_eq!(paths[0], "package.json");
        assert_eq!(*paths.last().unwrap(), "public/");
    }

    #[test]
    fn untyped_variant_emits_javascript_stubs() {
        let blueprint = render(&answers(false, None)).unwrap();

        assert!(blueprint.entries.contains_key("server.js"));
        assert!(blueprint.entries.contains_key("routes/index.js"));
        assert!(blueprint.entries.contains_key("controllers/index.js"));
        assert!(blueprint.entries.contains_key("models/index.js"));
        assert!(!blueprint.entries.contains_key("tsconfig.json"));
    }

    #[test]
    fn typed_variant_emits_typescript_stubs() {
        let blueprint = render(&answers(true, None)).unwrap();

        assert!(blueprint.entries.contains_key("server.ts"));
        assert!(blueprint.entries.contains_key("tsconfig.json"));
        assert!(!blueprint.entries.contains_key("server.js"));
    }

    #[test]
    fn manifest_interpolates_name_and_author() {
        let blueprint = render(&answers(false, None)).unwrap();

        let manifest = &blueprint.entries["package.json"];

        assert!(manifest.contains(r#""name": "my-api""#));
        assert!(manifest.contains(r#""author": "ada""#));
        assert!(!manifest.contains("repository"));
    }

    #[test]
    fn manifest_includes_repository_when_given() {
        let blueprint =
            render(&answers(false, Some("https://github.com/ada/my-api.git"))).unwrap();

        let manifest = &blueprint.entries["package.json"];

        assert!(manifest.contains(r#""url": "https://github.com/ada/my-api.git""#));
    }

    #[test]
    fn setup_script_provisions_development_and_test_databases() {
        let blueprint = render(&answers(false, None)).unwrap();

        let script = &blueprint.entries["db/setup.sql"];

        assert_eq!(script.matches("DROP DATABASE IF EXISTS").count(), 2);
        assert_eq!(script.matches("CREATE DATABASE").count(), 2);
        assert!(script.contains("my_api_development"));
        assert!(script.contains("my_api_test"));
    }

    #[test]
    fn error_handlers_export_the_four_fixed_names() {
        let blueprint = render(&answers(false, None)).unwrap();

        let module = &blueprint.entries["middlewares/errorHandlers.js"];

        for handler in [
            "inputErrorHandler",
            "databaseErrorHandler",
            "customErrorHandler",
            "serverErrorHandler",
        ] {
            assert!(module.contains(handler), "missing {handler}");
        }
    }

    #[test]
    fn example_env_combines_all_three_environments() {
        let blueprint = render(&answers(false, None)).unwrap();

        let example = &blueprint.entries[".env.example"];

        assert!(example.contains("NODE_ENV=development"));
        assert!(example.contains("NODE_ENV=test"));
        assert!(example.contains("NODE_ENV=production"));
    }

    #[test]
    fn public_entry_is_spelled_as_a_directory() {
        let blueprint = render(&answers(false, None)).unwrap();

        assert!(blueprint.entries.contains_key("public/"));
        assert_eq!(blueprint.entries["public/"], "");
    }
}
