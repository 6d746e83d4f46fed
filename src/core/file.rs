use crate::core::number::round_to;
use crate::domain::model::Download;
use crate::domain::ports::DownloadTarget;
use crate::utils::error::Result;
use uuid::Uuid;

pub const DEFAULT_MIME_TYPE: &str = "application/octet-stream";

const IMAGE_EXTENSIONS: [&str; 6] = ["jpg", "jpeg", "png", "gif", "webp", "svg"];
const SIZE_UNITS: [&str; 4] = ["Б", "КБ", "МБ", "ГБ"];
const SIZE_STEP: f64 = 1024.0;

/// Text after the last dot, lower-cased. A name without dots is returned whole.
pub fn get_extension(filename: &str) -> String {
    filename
        .rsplit('.')
        .next()
        .unwrap_or(filename)
        .to_lowercase()
}

pub fn is_image(filename: &str) -> bool {
    IMAGE_EXTENSIONS.contains(&get_extension(filename).as_str())
}

/// 以 1024 為級距換算，最多兩位小數並去除多餘的 0
pub fn format_size(bytes: u64) -> String {
    if bytes == 0 {
        return format!("0 {}", SIZE_UNITS[0]);
    }

    let mut value = bytes as f64;
    let mut unit = 0;
    while value >= SIZE_STEP && unit < SIZE_UNITS.len() - 1 {
        value /= SIZE_STEP;
        unit += 1;
    }

    let fixed = format!("{:.2}", round_to(value, 2));
    let trimmed = fixed.trim_end_matches('0').trim_end_matches('.');
    format!("{} {}", trimmed, SIZE_UNITS[unit])
}

/// Hands `data` to the platform's download mechanism under `filename`.
///
/// The blob's object URL is revoked once the target has consumed it, whether or
/// not saving succeeded.
pub async fn download<T>(
    target: &T,
    data: impl Into<Vec<u8>>,
    filename: &str,
    mime_type: Option<&str>,
) -> Result<()>
where
    T: DownloadTarget + ?Sized,
{
    let download = Download {
        object_url: format!("blob:{}", Uuid::new_v4()),
        filename: filename.to_string(),
        mime_type: mime_type.unwrap_or(DEFAULT_MIME_TYPE).to_string(),
        data: data.into(),
    };

    tracing::debug!(
        "Starting download {} ({})",
        download.filename,
        format_size(download.size() as u64)
    );

    let saved = target.save(&download).await;
    if let Err(e) = target.revoke(&download.object_url).await {
        tracing::warn!("Failed to revoke {}: {}", download.object_url, e);
    }
    saved
}
