use serde::Serialize;

use recompile::application::error::AppError;

pub fn print_json<T: Serialize>(value: &T) -> Result<(), AppError> {
    let out = serde_json::to_string_pretty(value)
        .map_err(|e| AppError::unexpected(format!("failed to render output: {e}")))?;
    println!("{out}");
    Ok(())
}
