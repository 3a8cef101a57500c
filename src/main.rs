use anyhow::{bail, Context, Result};
use rainharvest::{
    estimate::RoofMaterial, fetch::DataSource, load_reference_data, report, resolve_and_estimate,
    ProjectInput,
};
use reqwest::Client;
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

const USAGE: &str = "usage:
  rainharvest locations
  rainharvest estimate <location> <roof_area_m2> <material> <occupants> [--json]

materials: Concrete, Tile, Metal, Thatched
data source: RAINHARVEST_DATA (directory or http(s) base URL, default ./data)";

#[tokio::main]
async fn main() -> Result<()> {
    let env = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt::Subscriber::builder().with_env_filter(env).init();

    let source_spec = std::env::var("RAINHARVEST_DATA").unwrap_or_else(|_| "data".to_string());
    let source = DataSource::parse(&source_spec)?;
    info!(%source, "loading reference data");

    let client = Client::new();
    let data = load_reference_data(&client, &source).await?;

    let args: Vec<String> = std::env::args().skip(1).collect();
    match args.first().map(String::as_str) {
        Some("locations") => {
            for name in data.locations.names() {
                println!("{name}");
            }
        }
        Some("estimate") => {
            let rest = &args[1..];
            let json = rest.last().map(String::as_str) == Some("--json");
            let rest = if json { &rest[..rest.len() - 1] } else { rest };
            let [location, area, material, occupants] = rest else {
                bail!("{USAGE}");
            };

            let input = ProjectInput {
                location: location.clone(),
                roof_area_m2: area
                    .parse()
                    .with_context(|| format!("roof area `{area}` is not a number"))?,
                roof_material: RoofMaterial::from_name(material),
                occupants: occupants
                    .parse()
                    .with_context(|| format!("occupant count `{occupants}` is not a number"))?,
            };
            if !data.locations.contains(&input.location) {
                info!(location = %input.location, "not in the location catalog, estimating anyway");
            }

            let assessment = resolve_and_estimate(&data, &input)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&assessment)?);
            } else {
                print!("{}", report::render(&assessment));
            }
        }
        _ => bail!("{USAGE}"),
    }

    Ok(())
}
