use seamcarve::{carve_image, Config, Mode};

extern crate clap;
extern crate image;

use clap::{App, Arg, ArgMatches};
use failure::{format_err, Error};
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

fn config_from(matches: &ArgMatches) -> Result<Config, Error> {
    let input = matches
        .value_of("input")
        .ok_or_else(|| format_err!("no input image given"))?;
    let output = matches
        .value_of("output")
        .ok_or_else(|| format_err!("no output path given"))?;
    let percent = match matches.value_of("percent") {
        Some(p) => p
            .parse::<f64>()
            .map_err(|_| format_err!("percent '{}' is not a number", p))?,
        None => 90.0,
    };
    let mode = match matches.value_of("mode") {
        Some(m) => m.parse::<Mode>()?,
        None => Mode::Commit,
    };
    Ok(Config::new(input, output)
        .with_percent(percent)
        .with_mode(mode))
}

fn run(config: &Config) -> Result<(), Error> {
    info!(input = %config.input.display(), "decoding");
    let image = image::open(&config.input)?.to_rgba();
    let carved = carve_image(&image, config.percent, config.mode)?;
    info!(
        output = %config.output.display(),
        width = carved.width(),
        height = carved.height(),
        "encoding"
    );
    carved.save(&config.output)?;
    Ok(())
}

fn main() {
    let matches = App::new("seamcarve")
        .version("0.1.0")
        .author("Elf M. Sternberg <elf.sternberg@gmail.com>")
        .about("Content-aware image narrowing by seam carving")
        .arg(
            Arg::with_name("input")
                .help("The image to carve")
                .required(true)
                .index(1),
        )
        .arg(
            Arg::with_name("output")
                .help("Where to write the result")
                .required(true)
                .index(2),
        )
        .arg(
            Arg::with_name("percent")
                .short("p")
                .long("percent")
                .takes_value(true)
                .help("Target width as a percentage of the original [default: 90]"),
        )
        .arg(
            Arg::with_name("mode")
                .short("m")
                .long("mode")
                .takes_value(true)
                .possible_values(&["commit", "visualize-path", "visualize-energy"])
                .help("Remove seams, or paint them over the image or its energy"),
        )
        .arg(
            Arg::with_name("verbose")
                .short("v")
                .multiple(true)
                .help("More logging; repeat for more"),
        )
        .get_matches();

    let level = match matches.occurrences_of("verbose") {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };
    FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .compact()
        .with_writer(std::io::stderr)
        .init();

    if let Err(err) = config_from(&matches).and_then(|config| run(&config)) {
        eprintln!("seamcarve: {}", err);
        std::process::exit(1);
    }
}
