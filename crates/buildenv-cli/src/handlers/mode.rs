//! Mode command handler.

use std::io::Write;

use buildenv_core::{Probes, resolve};

use crate::error::CliError;

pub fn execute(probes: &Probes, json: bool, out: &mut dyn Write) -> Result<(), CliError> {
    let mode = resolve(probes).mode();
    if json {
        serde_json::to_writer(&mut *out, &serde_json::json!({ "mode": mode }))?;
        writeln!(out)?;
    } else {
        writeln!(out, "{mode}")?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nothing_found_prints_none() {
        let mut out = Vec::new();
        execute(&Probes::empty(), false, &mut out).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "none\n");
    }

    #[test]
    fn json_wraps_mode() {
        let mut out = Vec::new();
        execute(&Probes::empty(), true, &mut out).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "{\"mode\":\"none\"}\n");
    }
}
