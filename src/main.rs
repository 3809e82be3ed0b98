use clap::{App, AppSettings, Arg, ArgMatches, SubCommand};
use log::info;
use std::error::Error;
use std::path::PathBuf;
use tlpc::{
    classifier::{summary, Pipeline},
    generate::generate,
    oracle::NoOracles,
    reference::ReferenceTables,
    relations::RelationGraph,
    store::{self, ProblemSet},
    types::Degree,
};

fn parse_degree(matches: &ArgMatches, name: &str) -> Degree {
    let degree = matches
        .value_of(name)
        .and_then(|value| value.parse::<Degree>().ok())
        .unwrap_or_else(|| {
            eprintln!("the {} is not an int", name);
            std::process::exit(1);
        });
    if degree < 2 {
        eprintln!("a degree must be superior or equal to 2");
        std::process::exit(1);
    }
    degree
}

fn degrees(matches: &ArgMatches) -> (Degree, Degree) {
    let white_degree = parse_degree(matches, "white-degree");
    let black_degree = parse_degree(matches, "black-degree");
    (
        white_degree.min(black_degree),
        white_degree.max(black_degree),
    )
}

fn data_path(matches: &ArgMatches, min_degree: Degree, max_degree: Degree) -> PathBuf {
    matches
        .value_of("data")
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(store::data_name(min_degree, max_degree)))
}

fn handle_generate(matches: &ArgMatches) -> Result<(), Box<dyn Error>> {
    let (min_degree, max_degree) = degrees(matches);
    let universe = generate(min_degree, max_degree);
    let relations = RelationGraph::build(&universe);
    let path = data_path(matches, min_degree, max_degree);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    store::save(&path, &universe, &relations, ProblemSet::Unclassified)?;
    info!("stored {} problems to {}", universe.len(), path.display());
    Ok(())
}

fn handle_classify(matches: &ArgMatches) -> Result<(), Box<dyn Error>> {
    let (min_degree, max_degree) = degrees(matches);
    let path = data_path(matches, min_degree, max_degree);
    let (mut universe, relations) = store::load(&path, ProblemSet::Unclassified)?;
    let tables = ReferenceTables::default();
    let mut pipeline = Pipeline::new(&mut universe, &relations, &NoOracles, &tables)?;
    pipeline.run();
    for &(complexity, count) in summary(&universe).iter() {
        println!("{} problems: {}", complexity.name(), count);
    }
    if matches.is_present("store") {
        store::save(&path, &universe, &relations, ProblemSet::Classified)?;
        let directory = PathBuf::from(format!("output/{}_{}", min_degree, max_degree));
        std::fs::create_dir_all(&directory)?;
        for &(complexity, _) in summary(&universe).iter() {
            let name = complexity.name().replace(' ', "_");
            store::write_listing(
                &directory.join(format!("{}.txt", name)),
                universe.problems().filter(|p| p.complexity() == complexity),
            )?;
        }
    }
    Ok(())
}

fn degree_args<'a, 'b>(subcommand: App<'a, 'b>) -> App<'a, 'b> {
    subcommand
        .arg(
            Arg::with_name("white-degree")
                .short("w")
                .long("wdegree")
                .takes_value(true)
                .required(true)
                .help("The white node degree (>= 2)"),
        )
        .arg(
            Arg::with_name("black-degree")
                .short("b")
                .long("bdegree")
                .takes_value(true)
                .required(true)
                .help("The black node degree (>= 2)"),
        )
        .arg(
            Arg::with_name("data")
                .long("data")
                .takes_value(true)
                .help("Path of the problem set database"),
        )
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();
    let matches = App::new("tlpc")
        .about("Round-complexity classification of three-label LCL problems")
        .setting(AppSettings::SubcommandRequiredElseHelp)
        .subcommand(degree_args(
            SubCommand::with_name("generate")
                .about("Enumerate the problem universe and its relation graph"),
        ))
        .subcommand(
            degree_args(
                SubCommand::with_name("classify")
                    .about("Classify a previously generated problem universe"),
            )
            .arg(
                Arg::with_name("store")
                    .short("s")
                    .long("store")
                    .help("Store the classified set and per-complexity listings"),
            ),
        )
        .get_matches();
    if let Some(matches) = matches.subcommand_matches("generate") {
        handle_generate(matches)?;
    } else if let Some(matches) = matches.subcommand_matches("classify") {
        handle_classify(matches)?;
    }
    Ok(())
}
