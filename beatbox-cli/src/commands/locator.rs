//! Locator commands: `parse` and `url`.

use beatbox::{parse_mapbox_url, UrlTranslator};

use super::common::{translator, ApiArgs};
use crate::error::CliError;

/// Print the parsed form of a locator as JSON.
pub fn run_parse(locator: &str) -> Result<(), CliError> {
    let parsed = parse_mapbox_url(locator);
    println!("{}", serde_json::to_string_pretty(&parsed)?);
    Ok(())
}

/// Print the HTTP URL of each locator, one per line.
pub fn run_url(args: &ApiArgs, locators: &[String]) -> Result<(), CliError> {
    let translator = translator(args)?;
    for url in translate_all(&translator, locators) {
        println!("{}", url);
    }
    Ok(())
}

fn translate_all(translator: &UrlTranslator, locators: &[String]) -> Vec<String> {
    locators
        .iter()
        .map(|locator| translator.to_http_url(locator))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use beatbox::TranslatorConfig;

    #[test]
    fn test_translate_all_keeps_order() {
        let translator = UrlTranslator::new(TranslatorConfig::new().with_access_token("t"));
        let urls = translate_all(
            &translator,
            &[
                "mapbox://tiles/a.b".to_string(),
                "https://example.com".to_string(),
                "mapbox://styles/u/s".to_string(),
            ],
        );

        assert_eq!(
            urls,
            vec![
                "https://api.mapbox.com/v4/a.b.json?access_token=t",
                "https://example.com",
                "https://api.mapbox.com/styles/v1/u/s?access_token=t",
            ]
        );
    }
}
