//! `frappe-build list` - show discovered units

use anyhow::Result;
use frappe_build::discover;

use super::Context;
use crate::ui;

pub fn cmd_list(ctx: &Context) -> Result<()> {
    let units = discover(ctx.root())?;

    if ctx.json {
        for unit in &units {
            println!("{}", serde_json::to_string(unit)?);
        }
        return Ok(());
    }

    if units.is_empty() {
        println!("No DocTypes with ts/ folders or public/ts folders found");
    } else {
        print!("{}", ui::render_units(&units, ctx.root()));
    }
    Ok(())
}
