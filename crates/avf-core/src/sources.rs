//! Built-in avatar source catalogs.
//!
//! Each function returns tasks with destinations relative to the batch's
//! destination directory, numbered from 1.

use crate::task::DownloadTask;
use crate::url_model::sanitize_filename_component;

/// Static list of cartoon avatars.
const CARTOON_BASE: &str = "https://mockmind-api.uifaces.co/content/cartoon";
const CARTOON_IDS: std::ops::RangeInclusive<u32> = 23..=32;

const DICEBEAR_SEEDS: [&str; 5] = ["James", "Maria", "Alex", "Zoe", "Leo"];
const PRAVATAR_COUNT: u32 = 5;
const ROBOHASH_COUNT: u32 = 5;

/// Prefix used when a caller-supplied prefix sanitizes to nothing.
const FALLBACK_PREFIX: &str = "avatar";

/// `{prefix}_{n}.{ext}` with `n` starting at 1.
pub fn numbered_filename(prefix: &str, n: usize, ext: &str) -> String {
    let prefix = sanitize_filename_component(prefix);
    let prefix = if prefix.is_empty() {
        FALLBACK_PREFIX
    } else {
        prefix.as_str()
    };
    format!("{prefix}_{n}.{}", ext.trim_start_matches('.'))
}

/// One task per URL, named `{prefix}_{n}.{ext}` in input order.
pub fn numbered_tasks<I, S>(urls: I, prefix: &str, ext: &str) -> Vec<DownloadTask>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    urls.into_iter()
        .enumerate()
        .map(|(i, url)| DownloadTask::new(url, numbered_filename(prefix, i + 1, ext)))
        .collect()
}

/// Cartoon avatars 23..=32 saved as `avatar_1.jpg` .. `avatar_10.jpg`.
pub fn cartoon_tasks() -> Vec<DownloadTask> {
    numbered_tasks(
        CARTOON_IDS.map(|id| format!("{CARTOON_BASE}/{id}.jpg")),
        "avatar",
        "jpg",
    )
}

/// DiceBear "big-smile" PNGs, one per seed.
pub fn dicebear_tasks() -> Vec<DownloadTask> {
    numbered_tasks(
        DICEBEAR_SEEDS
            .iter()
            .map(|seed| format!("https://api.dicebear.com/7.x/big-smile/png?seed={seed}")),
        "dicebear",
        "png",
    )
}

/// Pravatar placeholders keyed by `u=101..=105`.
pub fn pravatar_tasks() -> Vec<DownloadTask> {
    numbered_tasks(
        (1..=PRAVATAR_COUNT).map(|i| format!("https://i.pravatar.cc/300?u={}", i + 100)),
        "pravatar",
        "jpg",
    )
}

/// RoboHash robots `51..=55` from set1.
pub fn robohash_tasks() -> Vec<DownloadTask> {
    numbered_tasks(
        (1..=ROBOHASH_COUNT).map(|i| format!("https://robohash.org/{}?set=set1", i + 50)),
        "robot",
        "png",
    )
}

/// DiceBear, then Pravatar, then RoboHash.
pub fn generated_tasks() -> Vec<DownloadTask> {
    let mut tasks = dicebear_tasks();
    tasks.extend(pravatar_tasks());
    tasks.extend(robohash_tasks());
    tasks
}
