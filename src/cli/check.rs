use crate::config::VoxgateConfig;
use crate::error::Result;
use crate::filter::KeywordFilter;

/// Execute the `check` command: classify a string with the configured
/// denylist and print the decision.
pub fn execute(text: &str) -> Result<()> {
    let config = VoxgateConfig::load()?;
    let filter = KeywordFilter::new(&config.denylist);

    let decision = filter.classify(text);
    match decision.matched_keyword {
        Some(keyword) => println!("BLOCK (matched: {keyword:?})"),
        None => println!("ALLOW"),
    }

    Ok(())
}
