//! Command utilities and stuff.

use std::process::Stdio;

use crate::{CommandSnafu, Error};

/// Build the arguments for `rg --files` over the given paths, skipping
/// anything matching an exclude glob.
pub fn rg_files_args(paths: &[String], excludes: &[String]) -> Vec<String> {
    let mut args = vec!["--files".to_owned()];
    for exclude in excludes.iter() {
        args.extend(["-g".to_owned(), format!("!{}", exclude)]);
    }
    args.extend(paths.iter().cloned());
    args
}

/// Run `rg --files`, returning the listing bytes if successful.
///
/// `rg` exits with 1 when it finds no files at all, which is not an error
/// here.
pub async fn get_rg_files_output(paths: &[String], excludes: &[String]) -> Result<Vec<u8>, Error> {
    let args = rg_files_args(paths, excludes);
    log::trace!("running rg:\nrg {}", args.join(" "));
    let child = tokio::process::Command::new("rg")
        .args(args)
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()?;
    let output = child.wait_with_output().await?;
    match output.status.code() {
        Some(0) => Ok(output.stdout),
        Some(1) => Ok(vec![]),
        _ => CommandSnafu {
            cmd: "rg --files",
            status: output.status,
            stdout: String::from_utf8_lossy(&output.stdout).trim().to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
        }
        .fail(),
    }
}
