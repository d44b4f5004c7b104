use clap::{
    crate_authors, crate_description, crate_name, crate_version, Arg, ArgAction, ArgMatches,
    Command,
};

// The CLI layer should only parse inputs and forward them to library code.
fn main() -> miette::Result<()> {
    env_logger::init();

    let matches = Command::new(crate_name!())
        .about(crate_description!())
        .author(crate_authors!())
        .version(crate_version!())
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .help("Enable verbose output")
                .action(ArgAction::SetTrue)
                .global(true),
        )
        .subcommand_required(true)
        .subcommand(
            Command::new("new")
                .about("Scaffolds a new Express API project")
                .arg(
                    Arg::new("destination")
                        .help("Directory to scaffold into (defaults to the project name)"),
                )
                .arg(
                    Arg::new("skip-install")
                        .help("Skip dependency installation")
                        .long("skip-install")
                        .action(ArgAction::SetTrue),
                ),
        )
        .get_matches();

    let is_verbose = matches.get_flag("verbose");

    match matches.subcommand() {
        Some(("new", args)) => handle_new(args, is_verbose)?,
        _ => unreachable!(),
    }

    Ok(())
}

fn handle_new(args: &ArgMatches, is_verbose: bool) -> miette::Result<()> {
    let destination = args.get_one::<String>("destination").map(String::as_str);
    let skip_install = args.get_flag("skip-install");

    if is_verbose {
        println!("executing in verbose mode");
    }

    expresso::api::new_project(destination, skip_install)?;

    Ok(())
}
