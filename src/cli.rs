use clap::Parser;

#[derive(Parser)]
#[command(name = "typeahead", about = "Multi-tenant prefix autocomplete service", version)]
pub struct Cli {
    /// Address to bind to (overrides TYPEAHEAD_HOST)
    #[arg(long)]
    pub host: Option<String>,

    /// Port to bind to (overrides TYPEAHEAD_PORT)
    #[arg(short, long)]
    pub port: Option<u16>,

    /// Auth key to domain mappings, e.g. `xyz123=peterbecom`, for
    /// bootstrapping the auth-key table without an external loader.
    #[arg(long = "auth-key", value_parser = parse_auth_key)]
    pub auth_keys: Vec<(String, String)>,
}

fn parse_auth_key(s: &str) -> Result<(String, String), String> {
    s.split_once('=')
        .map(|(k, d)| (k.to_string(), d.to_string()))
        .ok_or_else(|| format!("expected KEY=DOMAIN, got {s:?}"))
}
