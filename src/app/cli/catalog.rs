//! Catalog command implementation.

use std::io;

use crate::domain::AppError;

pub fn run_catalog(json: bool) -> Result<(), AppError> {
    let listing = crate::catalog();

    if json {
        let text = serde_json::to_string_pretty(&listing).map_err(io::Error::from)?;
        println!("{}", text);
        return Ok(());
    }

    println!("Applications:");
    for app in &listing.apps {
        println!("  {} - {}", app.name, app.description);
    }
    println!("\nStartup services:");
    for (i, filename) in listing.startup_services.iter().enumerate() {
        println!("  {}. {}", i + 1, filename);
    }
    Ok(())
}
