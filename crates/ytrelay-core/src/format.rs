//! Stream format metadata reported by the extraction collaborator

use serde::{Deserialize, Serialize};

/// One encoded variant from the metadata dump. For YouTube, `format_id`
/// is the itag assigned by the upstream service.
#[derive(Debug, Clone, Deserialize)]
pub struct RawFormat {
    pub format_id: String,
    #[serde(default)]
    pub ext: String,
    /// Quality label such as "720p". yt-dlp calls this `format_note`.
    #[serde(default)]
    pub format_note: Option<String>,
    #[serde(default)]
    pub acodec: Option<String>,
    #[serde(default)]
    pub vcodec: Option<String>,
}

impl RawFormat {
    pub fn has_audio(&self) -> bool {
        codec_present(self.acodec.as_deref())
    }

    pub fn has_video(&self) -> bool {
        codec_present(self.vcodec.as_deref())
    }

    fn quality_label(&self) -> Option<&str> {
        self.format_note.as_deref().filter(|label| !label.is_empty())
    }
}

// yt-dlp reports "none" for the missing half of a video-only or
// audio-only variant.
fn codec_present(codec: Option<&str>) -> bool {
    matches!(codec, Some(c) if !c.is_empty() && c != "none")
}

/// The info payload shown to the end user per available variant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FormatDescriptor {
    pub itag: String,
    pub resolution: String,
    pub container: String,
}

/// Keep only variants carrying both audio and video, in the collaborator's
/// native order. Variants without a quality label are shown as "Unknown".
pub fn progressive_descriptors(formats: &[RawFormat]) -> Vec<FormatDescriptor> {
    formats
        .iter()
        .filter(|f| f.has_audio() && f.has_video())
        .map(|f| FormatDescriptor {
            itag: f.format_id.clone(),
            resolution: f.quality_label().unwrap_or("Unknown").to_string(),
            container: f.ext.clone(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn format(id: &str, note: Option<&str>, ext: &str, acodec: &str, vcodec: &str) -> RawFormat {
        RawFormat {
            format_id: id.to_string(),
            ext: ext.to_string(),
            format_note: note.map(str::to_string),
            acodec: Some(acodec.to_string()),
            vcodec: Some(vcodec.to_string()),
        }
    }

    #[test]
    fn test_audio_only_and_video_only_excluded() {
        let formats = vec![
            format("18", Some("360p"), "mp4", "mp4a.40.2", "avc1.42001E"),
            format("22", Some("720p"), "mp4", "mp4a.40.2", "avc1.64001F"),
            format("140", Some("medium"), "m4a", "mp4a.40.2", "none"),
            format("137", Some("1080p"), "mp4", "none", "avc1.640028"),
        ];

        let descriptors = progressive_descriptors(&formats);
        assert_eq!(
            descriptors,
            vec![
                FormatDescriptor {
                    itag: "18".to_string(),
                    resolution: "360p".to_string(),
                    container: "mp4".to_string(),
                },
                FormatDescriptor {
                    itag: "22".to_string(),
                    resolution: "720p".to_string(),
                    container: "mp4".to_string(),
                },
            ]
        );
    }

    #[test]
    fn test_missing_label_becomes_unknown() {
        let formats = vec![
            format("18", None, "mp4", "mp4a.40.2", "avc1.42001E"),
            format("22", Some(""), "mp4", "mp4a.40.2", "avc1.64001F"),
        ];

        let descriptors = progressive_descriptors(&formats);
        assert_eq!(descriptors.len(), 2);
        assert!(descriptors.iter().all(|d| d.resolution == "Unknown"));
    }

    #[test]
    fn test_no_progressive_formats_is_empty_not_error() {
        let formats = vec![format("140", Some("medium"), "m4a", "mp4a.40.2", "none")];
        assert!(progressive_descriptors(&formats).is_empty());
        assert!(progressive_descriptors(&[]).is_empty());
    }

    #[test]
    fn test_collaborator_order_preserved() {
        let formats = vec![
            format("22", Some("720p"), "mp4", "mp4a.40.2", "avc1.64001F"),
            format("18", Some("360p"), "mp4", "mp4a.40.2", "avc1.42001E"),
        ];

        let descriptors = progressive_descriptors(&formats);
        assert_eq!(descriptors[0].itag, "22");
        assert_eq!(descriptors[1].itag, "18");
    }

    #[test]
    fn test_absent_codec_fields_count_as_missing() {
        let mut f = format("sb0", Some("storyboard"), "mhtml", "", "");
        f.acodec = None;
        f.vcodec = None;
        assert!(!f.has_audio());
        assert!(!f.has_video());
    }
}
