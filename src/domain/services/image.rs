use crate::domain::models::upload::{ImageKind, ImageUpload};
use crate::error::AppError;

const ACCEPTED_TYPES: [(&str, ImageKind); 4] = [
    ("image/jpeg", ImageKind::Jpeg),
    ("image/jpg", ImageKind::Jpeg),
    ("image/png", ImageKind::Png),
    ("image/webp", ImageKind::WebP),
];

/// Detects the image format from its leading bytes.
pub fn sniff(bytes: &[u8]) -> Option<ImageKind> {
    if bytes.starts_with(&[0xFF, 0xD8, 0xFF]) {
        return Some(ImageKind::Jpeg);
    }
    if bytes.starts_with(&[0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A]) {
        return Some(ImageKind::Png);
    }
    if bytes.len() >= 12 && &bytes[0..4] == b"RIFF" && &bytes[8..12] == b"WEBP" {
        return Some(ImageKind::WebP);
    }
    None
}

/// Accepts JPEG, PNG and WebP up to `max_bytes`. The declared content type
/// must agree with the file contents.
pub fn validate_image(content_type: Option<&str>, bytes: Vec<u8>, max_bytes: usize) -> Result<ImageUpload, AppError> {
    let invalid_type = || AppError::Validation("Geçersiz dosya türü. Sadece JPEG, PNG ve WebP desteklenir.".into());

    let declared = content_type
        .map(|ct| ct.split(';').next().unwrap_or(ct).trim().to_ascii_lowercase())
        .and_then(|ct| ACCEPTED_TYPES.iter().find(|(name, _)| *name == ct).map(|(_, kind)| *kind))
        .ok_or_else(invalid_type)?;

    if bytes.len() > max_bytes {
        return Err(AppError::Validation(format!(
            "Dosya boyutu çok büyük. Maksimum {}MB.",
            max_bytes / (1024 * 1024)
        )));
    }

    match sniff(&bytes) {
        Some(kind) if kind == declared => Ok(ImageUpload { kind, bytes }),
        _ => Err(invalid_type()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PNG_HEADER: [u8; 8] = [0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];

    fn webp() -> Vec<u8> {
        let mut bytes = b"RIFF".to_vec();
        bytes.extend_from_slice(&[0, 0, 0, 0]);
        bytes.extend_from_slice(b"WEBPVP8 ");
        bytes
    }

    #[test]
    fn test_sniff_formats() {
        assert_eq!(sniff(&[0xFF, 0xD8, 0xFF, 0xE0]), Some(ImageKind::Jpeg));
        assert_eq!(sniff(&PNG_HEADER), Some(ImageKind::Png));
        assert_eq!(sniff(&webp()), Some(ImageKind::WebP));
        assert_eq!(sniff(b"GIF89a"), None);
    }

    #[test]
    fn test_validate_accepts_matching_type() {
        let upload = validate_image(Some("image/jpg"), vec![0xFF, 0xD8, 0xFF, 0xDB], 1024).unwrap();
        assert_eq!(upload.kind, ImageKind::Jpeg);

        let upload = validate_image(Some("image/webp"), webp(), 1024).unwrap();
        assert_eq!(upload.kind.extension(), "webp");
    }

    #[test]
    fn test_validate_rejects_bad_input() {
        assert!(validate_image(Some("image/gif"), b"GIF89a".to_vec(), 1024).is_err());
        assert!(validate_image(None, PNG_HEADER.to_vec(), 1024).is_err());
        // PNG bytes declared as JPEG
        assert!(validate_image(Some("image/jpeg"), PNG_HEADER.to_vec(), 1024).is_err());

        let mut big = PNG_HEADER.to_vec();
        big.resize(2 * 1024 * 1024, 0);
        match validate_image(Some("image/png"), big, 1024 * 1024) {
            Err(AppError::Validation(msg)) => assert!(msg.contains("1MB")),
            other => panic!("expected size rejection, got {:?}", other.map(|u| u.kind)),
        }
    }
}
