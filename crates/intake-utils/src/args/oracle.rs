use clap::Args;

#[derive(Debug, Clone, Args)]
pub struct OracleService {
    #[arg(long, env = "ORACLE_API_BASE", required = false)]
    pub oracle_api_base: Option<String>,
    #[arg(long, env = "ORACLE_API_KEY", required = false)]
    pub oracle_key: Option<String>,
    #[arg(long, env = "ORACLE_MODEL", required = false)]
    pub oracle_model: Option<String>,
}

impl OracleService {
    /// The oracle stays disabled until an endpoint or key is supplied.
    #[must_use]
    pub fn is_configured(&self) -> bool {
        self.oracle_api_base.is_some() || self.oracle_key.is_some()
    }
}
