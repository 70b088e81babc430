//! Report command table and dispatcher.
//!
//! Commands are plain table entries built at startup. The clap command line
//! is derived from the table, and [`dispatch`] runs the shared pipeline
//! before handing the loaded store to the selected handler.

use anyhow::Context;
use clap::{Args, Command};
use ev_insights_store::FusionStore;
use futures::FutureExt;
use futures::future::LocalBoxFuture;
use tracing::info;

use crate::config::Settings;
use crate::{display, pipeline};

/// Render one report from a loaded store.
pub type Handler = for<'a> fn(&'a FusionStore) -> LocalBoxFuture<'a, anyhow::Result<String>>;

pub struct CommandSpec {
    pub name: &'static str,
    pub about: &'static str,
    pub handler: Handler,
}

pub struct CommandTable {
    commands: Vec<CommandSpec>,
}

impl CommandTable {
    /// The three report commands.
    pub fn reports() -> Self {
        Self {
            commands: vec![
                CommandSpec {
                    name: "popular-makes",
                    about: "Count registrations per make, most common first",
                    handler: popular_makes,
                },
                CommandSpec {
                    name: "electric-range-by-make",
                    about: "Average electric range per make",
                    handler: electric_range_by_make,
                },
                CommandSpec {
                    name: "vehicle-counts-by-model-year",
                    about: "Count registrations per model year, most common first",
                    handler: vehicle_counts_by_model_year,
                },
            ],
        }
    }

    pub fn get(&self, name: &str) -> Option<&CommandSpec> {
        self.commands.iter().find(|c| c.name == name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &CommandSpec> {
        self.commands.iter()
    }
}

/// Build the clap command line for `table`.
pub fn build_cli(table: &CommandTable) -> Command {
    let cli = Command::new("ev-insights")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Reports over Washington State electric vehicle registrations")
        .subcommand_required(true)
        .arg_required_else_help(true);
    let cli = Settings::augment_args(cli);
    table.iter().fold(cli, |cli, spec| {
        cli.subcommand(Command::new(spec.name).about(spec.about))
    })
}

/// Run the named command: load the dataset, render the report, print it.
pub async fn dispatch(
    table: &CommandTable,
    name: &str,
    settings: &Settings,
) -> anyhow::Result<()> {
    let spec = table
        .get(name)
        .with_context(|| format!("unknown command `{name}`"))?;
    info!(command = spec.name, "running report");

    let store = pipeline::load(settings).await?;
    let report = (spec.handler)(&store)
        .await
        .with_context(|| format!("running {}", spec.name))?;
    print!("{report}");
    Ok(())
}

fn popular_makes(store: &FusionStore) -> LocalBoxFuture<'_, anyhow::Result<String>> {
    async move {
        let rows = store.popular_makes().await?;
        Ok::<_, anyhow::Error>(display::render_make_counts(&rows))
    }
    .boxed_local()
}

fn electric_range_by_make(store: &FusionStore) -> LocalBoxFuture<'_, anyhow::Result<String>> {
    async move {
        let rows = store.electric_range_by_make().await?;
        Ok::<_, anyhow::Error>(display::render_make_ranges(&rows))
    }
    .boxed_local()
}

fn vehicle_counts_by_model_year(
    store: &FusionStore,
) -> LocalBoxFuture<'_, anyhow::Result<String>> {
    async move {
        let rows = store.vehicle_counts_by_model_year().await?;
        Ok::<_, anyhow::Error>(display::render_year_counts(&rows))
    }
    .boxed_local()
}
