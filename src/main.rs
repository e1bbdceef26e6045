use clap::Parser;
use log::LevelFilter;
use log4rs::append::console::ConsoleAppender;
use log4rs::config::{Appender, Config, Root};
use log4rs::encode::pattern::PatternEncoder;
use std::error::Error;
use std::path::{Path, PathBuf};
use vpc_reconciler::aws::Ec2Cli;
use vpc_reconciler::config::{EnvConfig, DEFAULT_STACK};
use vpc_reconciler::output::{print_report, write_outputs};
use vpc_reconciler::store::{MemoryStore, RemoteStore};
use vpc_reconciler::RunOptions;

const LOG_CONFIG_FILE: &str = "log4rs.yml";

/// Adopt or create a tagged VPC and provision its public and private subnets.
#[derive(Parser, Debug)]
#[command(name = "vpc-reconciler", version)]
struct Cli {
    /// Active stack, used in subnet tags
    #[arg(short, long, env = "VPC_STACK", default_value = DEFAULT_STACK)]
    stack: String,
    /// AWS region passed to the AWS CLI
    #[arg(long, env = "AWS_REGION")]
    region: Option<String>,
    /// AWS CLI profile
    #[arg(long, env = "AWS_PROFILE")]
    profile: Option<String>,
    /// Also create a security group with this name
    #[arg(long)]
    security_group: Option<String>,
    /// Write the stack outputs as JSON to this file
    #[arg(short, long)]
    outputs: Option<PathBuf>,
    /// Use an in-memory store instead of calling AWS
    #[arg(long)]
    dry_run: bool,
    /// Debug logging (ignored when log4rs.yml exists)
    #[arg(short, long)]
    verbose: bool,
}

fn init_logging(verbose: bool) -> Result<(), Box<dyn Error>> {
    if Path::new(LOG_CONFIG_FILE).exists() {
        log4rs::init_file(LOG_CONFIG_FILE, Default::default())?;
        return Ok(());
    }
    let level = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };
    let stdout = ConsoleAppender::builder()
        .encoder(Box::new(PatternEncoder::new("{d(%H:%M:%S)} {h({l})} {t} - {m}{n}")))
        .build();
    let config = Config::builder()
        .appender(Appender::builder().build("stdout", Box::new(stdout)))
        .build(Root::builder().appender("stdout").build(level))?;
    log4rs::init_config(config)?;
    Ok(())
}

fn main() -> Result<(), Box<dyn Error>> {
    // Do as little as possible in main.rs as it can't contain any tests
    dotenv::dotenv().ok();
    let cli = Cli::parse();
    init_logging(cli.verbose)?;
    log::info!("#Start main() stack={}", cli.stack);

    let config = EnvConfig::new(&cli.stack);
    let store: Box<dyn RemoteStore> = if cli.dry_run {
        log::warn!("dry run: using in-memory store, nothing is created in AWS");
        Box::new(MemoryStore::new(["dry-run-zone-a", "dry-run-zone-b"]))
    } else {
        Box::new(Ec2Cli::new().region(cli.region).profile(cli.profile))
    };
    let options = RunOptions {
        security_group: cli.security_group,
    };

    let report = vpc_reconciler::run(&config, store.as_ref(), &options)?;
    print_report(&report);

    if let Some(path) = &cli.outputs {
        write_outputs(path, &cli.stack, &report.outputs)?;
    }

    Ok(())
}
