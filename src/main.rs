use anyhow::{Context, Result};
use mcfgen::{extract, mcf, registry};
use reqwest::Client;
use std::{
    env, fs,
    path::{Path, PathBuf},
};
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

/// Default input, matching the import this tool runs alongside.
const DEFAULT_INPUT: &str = "output/eurostat_population_physicalactivity.mcf";

/// Denominator nodes land next to the input as `<stem>_deno.mcf`.
fn deno_output_path(input: &Path) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    input.with_file_name(format!("{}_deno.mcf", stem))
}

#[tokio::main]
async fn main() -> Result<()> {
    // ─── 1) init logging ─────────────────────────────────────────────
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt::Subscriber::builder().with_env_filter(env_filter).init();
    info!("startup");

    // ─── 2) resolve paths ────────────────────────────────────────────
    let mut args = env::args().skip(1);
    let input = args
        .next()
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_INPUT));
    let output = args
        .next()
        .map(PathBuf::from)
        .unwrap_or_else(|| deno_output_path(&input));

    // ─── 3) extract denominator references ───────────────────────────
    let mcf_text = fs::read_to_string(&input)
        .with_context(|| format!("reading input MCF {}", input.display()))?;
    let denominators = extract::extract_denominators(&mcf_text);
    info!("{} distinct denominators referenced", denominators.len());

    // ─── 4) ask the registry which are already defined ───────────────
    let client = Client::new();
    let status =
        registry::check_dcid_existence(&client, registry::DEFAULT_API_ROOT, &denominators).await?;
    let missing = registry::missing_dcids(&status);
    info!("{} denominators missing from the registry", missing.len());

    // ─── 5) write nodes for the missing ones ─────────────────────────
    mcf::write_mcf(&missing, &output)?;
    info!("wrote {}", output.display());

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn output_path_inserts_deno_before_the_extension() {
        assert_eq!(
            deno_output_path(Path::new("output/eurostat_population_physicalactivity.mcf")),
            PathBuf::from("output/eurostat_population_physicalactivity_deno.mcf")
        );
    }
}
