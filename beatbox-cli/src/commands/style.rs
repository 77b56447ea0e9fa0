//! Style commands: `translate` and `resources`.

use std::fs;
use std::path::Path;

use beatbox::{translate_style_urls, StyleDocument, UrlTranslator};

use super::common::{beatbox, block_on, translator, ApiArgs};
use crate::error::CliError;

/// Rewrite a style's locators and print the result.
///
/// A path to an existing file is translated offline; anything else is
/// fetched, which requires an access token.
pub fn run_translate(args: &ApiArgs, input: &str) -> Result<(), CliError> {
    let path = Path::new(input);

    let style = if path.is_file() {
        translate_file(&translator(args)?, path)?
    } else {
        let beatbox = beatbox(args)?;
        block_on(beatbox.translate_style(input))??
    };

    println!("{}", serde_json::to_string_pretty(&style)?);
    Ok(())
}

/// Fetch a style and print the resources it references.
pub fn run_resources(args: &ApiArgs, input: &str, urls_only: bool) -> Result<(), CliError> {
    let beatbox = beatbox(args)?;
    let resources = block_on(beatbox.get_style_resources(input))??;

    if urls_only {
        for url in resources.all_urls() {
            println!("{}", url);
        }
    } else {
        println!("{}", serde_json::to_string_pretty(&resources)?);
    }
    Ok(())
}

fn translate_file(translator: &UrlTranslator, path: &Path) -> Result<StyleDocument, CliError> {
    let bytes = fs::read(path).map_err(|source| CliError::ReadFile {
        path: path.to_path_buf(),
        source,
    })?;
    let style = StyleDocument::from_slice(&bytes)?;
    Ok(translate_style_urls(translator, &style))
}
