use std::path::PathBuf;

use covgen::output::write_user_patch;
use covgen::pipeline::{load_population, publish_users};
use covgen::sink::build_user_admin;

use crate::cmd_helpers::{init_logging, load_config, make_rng};

pub(crate) fn run(
    config_path: PathBuf,
    out: Option<PathBuf>,
    seed: Option<u64>,
    dry_run: bool,
) -> anyhow::Result<()> {
    let config = load_config(&config_path)?;
    let admin = config.users.admin.as_ref().filter(|_| !dry_run);
    if out.is_none() && admin.is_none() {
        anyhow::bail!("nothing to do: pass --out or configure [users.admin]");
    }
    let _guard = init_logging(&config)?;
    let (mut rng, _) = make_rng(seed, &config);

    let population = load_population(&config, &mut rng).map_err(|e| anyhow::anyhow!("{e}"))?;
    if let Some(out) = &out {
        write_user_patch(population.users(), out).map_err(|e| anyhow::anyhow!("{e}"))?;
        println!(
            "Wrote {} users ({} delegates) to {}",
            population.len(),
            population.delegates().len(),
            out.display()
        );
    }
    if let Some(admin) = admin {
        let mut client = build_user_admin(admin).map_err(|e| anyhow::anyhow!("{e}"))?;
        let requests = publish_users(population.users(), admin.batch_size, &mut client)
            .map_err(|e| anyhow::anyhow!("{e}"))?;
        println!(
            "Sent {} users to {} in {requests} requests",
            population.len(),
            client.endpoint()
        );
    }
    Ok(())
}
