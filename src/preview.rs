use crate::blueprint::Blueprint;
use crate::materialize::{classify, EntryKind};
use colored::Colorize;
use std::cell::RefCell;
use std::collections::HashMap;
use std::path::Path;
use std::rc::Rc;

/// Represents a node in the tree (either file or directory).
#[derive(Debug)]
struct TreeNode {
    name: String,
    children: Vec<Rc<RefCell<TreeNode>>>,
    is_file: bool,
}
impl TreeNode {
    fn new(name: String, is_file: bool) -> Self {
        Self {
            name,
            children: Vec::new(),
            is_file,
        }
    }
}

/// Build the directory tree from the blueprint entries, returning the
/// root node. Intermediate directories that are not entries themselves
/// are created on the fly.
fn build_tree(blueprint: &Blueprint, destination: &Path) -> Rc<RefCell<TreeNode>> {
    let root_name = destination
        .file_name()
        .map(|os| os.to_string_lossy().to_string())
        .unwrap_or_else(|| destination.display().to_string());

    let root = Rc::new(RefCell::new(TreeNode::new(root_name, false)));

    // map accumulated relative path to node
    let mut lookup: HashMap<String, Rc<RefCell<TreeNode>>> = HashMap::new();

    for path in blueprint.entries.keys() {
        let is_file = classify(path) == EntryKind::File;

        let components: Vec<&str> = path.split('/').filter(|c| !c.is_empty()).collect();

        let mut accumulated = String::new();
        let mut parent = Rc::clone(&root);

        for (i, component) in components.iter().enumerate() {
            if !accumulated.is_empty() {
                accumulated.push('/');
            }
            accumulated.push_str(component);

            let is_last = i == components.len() - 1;

            let node = match lookup.get(&accumulated) {
                Some(node) => Rc::clone(node),
                None => {
                    let new_child = Rc::new(RefCell::new(TreeNode::new(
                        (*component).to_string(),
                        is_last && is_file,
                    )));

                    parent
                        .borrow_mut()
                        .children
                        .push(Rc::clone(&new_child));

                    lookup.insert(accumulated.clone(), Rc::clone(&new_child));

                    new_child
                }
            };

            parent = node;
        }
    }

    root
}

/// Print the tree with a nice ASCII style.
fn print_tree(node: &Rc<RefCell<TreeNode>>, prefix: &str, is_last: bool) {
    let node_borrow = node.borrow();

    let connector = if is_last {
        "└── ".yellow()
    } else {
        "├── ".yellow()
    };
    let name = if node_borrow.is_file {
        node_borrow.name.green()
    } else {
        node_borrow.name.blue()
    };
    println!("{}{}{}", prefix.yellow(), connector, name);

    let child_prefix = if is_last {
        format!("{}    ", prefix.yellow())
    } else {
        format!("{}│   ", prefix.yellow())
    };

    let len = node_borrow.children.len();
    for (i, child) in node_borrow.children.iter().enumerate() {
        let last = i == len - 1;
        print_tree(child, &child_prefix, last);
    }
}

/// Prints the planned tree before anything touches the filesystem.
pub fn print_plan(blueprint: &Blueprint, destination: &Path) {
    let tree_root = build_tree(blueprint, destination);

    println!(
        "Legend: {} = (directory), {} = (file)",
        "blue".blue(),
        "green".green()
    );

    let fancy_prompt = format!(
        "{} {}\n",
        "┌─".bold().bright_blue(),
        "Plan".bold().bright_blue(),
    );

    println!("{}", fancy_prompt);

    print_tree(&tree_root, "", true);

    println!();
}
