use clap::{Args, Parser, Subcommand};
use intake_utils::args::oracle::OracleService;
use std::net::IpAddr;
use url::Url;

#[derive(Debug, Parser)]
#[command(name = "intake-server", about = "Run the intake assessment server")]
pub(crate) struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub(crate) enum Commands {
    Run(Run),
}

#[derive(Debug, Clone, Args)]
pub(crate) struct Db {
    #[arg(long, env = "DATABASE_URL")]
    pub(crate) db_url: Url,

    #[arg(long, help = "Min connections")]
    pub(crate) db_min_connections: Option<u32>,

    #[arg(long, help = "Max connections")]
    pub(crate) db_max_connections: Option<u32>,
}

#[derive(Debug, Clone, Parser)]
pub(crate) struct Run {
    #[arg(long)]
    pub(crate) host: Option<IpAddr>,

    #[arg(short, long)]
    pub(crate) port: Option<u16>,

    #[arg(
        short,
        long,
        env = "INTAKE_CATALOGS",
        help = "The url where the question catalogs are stored"
    )]
    pub(crate) catalogs: Url,

    #[arg(long, default_value = "dev", help = "Deployment environment reported in logs")]
    pub(crate) env: String,

    #[command(flatten)]
    pub(crate) db: Db,

    #[command(flatten)]
    pub(crate) oracle: OracleService,
}
