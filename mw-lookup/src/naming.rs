//! Maps dictionary identifiers to cache file names and provider URLs.
//!
//! The cache directory is flat: `<word>.json`, `<audio_id>.wav`, `<art_id>.gif`.

use crate::config::Config;
use crate::types::{LookupError, ResourceKind, ResourceRequest, Result};
use url::Url;

/// Audio sub-directory on the media host, as dictated by the provider's API docs.
pub fn audio_shard(audio_id: &str) -> String {
    if audio_id.starts_with("bix") {
        "bix".to_string()
    } else if audio_id.starts_with("gg") {
        "gg".to_string()
    } else if audio_id.starts_with(|c: char| c.is_ascii_digit()) {
        "number".to_string()
    } else {
        audio_id.chars().next().map(String::from).unwrap_or_default()
    }
}

pub fn definition_request(word: &str, config: &Config) -> Result<ResourceRequest> {
    check_file_stem(word).map_err(|_| LookupError::InvalidWord(word.to_string()))?;

    let mut remote = Url::parse(&config.endpoints.api_base)?;
    remote
        .path_segments_mut()
        .map_err(|_| LookupError::InvalidUrl(url::ParseError::RelativeUrlWithCannotBeABaseBase))?
        .pop_if_empty()
        .push(word);
    remote.query_pairs_mut().append_pair("key", &config.api_key);

    Ok(ResourceRequest {
        kind: ResourceKind::Definition,
        local_path: config.cache_dir.join(format!("{}.json", word)),
        remote_url: remote.to_string(),
    })
}

pub fn image_request(art_id: &str, config: &Config) -> Result<ResourceRequest> {
    check_file_stem(art_id)?;
    let file_name = format!("{}.gif", art_id);

    Ok(ResourceRequest {
        kind: ResourceKind::Image,
        local_path: config.cache_dir.join(&file_name),
        remote_url: format!("{}{}", config.endpoints.image_base, file_name),
    })
}

pub fn audio_request(audio_id: &str, config: &Config) -> Result<ResourceRequest> {
    check_file_stem(audio_id)?;
    let file_name = format!("{}.wav", audio_id);

    Ok(ResourceRequest {
        kind: ResourceKind::Audio,
        local_path: config.cache_dir.join(&file_name),
        remote_url: format!(
            "{}{}/{}",
            config.endpoints.audio_base,
            audio_shard(audio_id),
            file_name
        ),
    })
}

/// Identifiers become file names directly under the cache directory.
fn check_file_stem(stem: &str) -> Result<()> {
    if stem.is_empty() || stem == "." || stem == ".." || stem.contains(['/', '\\']) {
        return Err(LookupError::InvalidWord(stem.to_string()));
    }
    Ok(())
}
