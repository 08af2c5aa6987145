use crate::errors::{AppError, ResultExt};
use crate::repair::{parse_lead_array, LeadArray, RepairPass};
use std::path::Path;

/// Reads a leads export from disk and parses it into raw lead records.
///
/// Records are returned in file order. Dangling commas are repaired (see
/// [`crate::repair`]); anything still unparseable, or a top level that is not
/// an array, is a [`AppError::MalformedInput`].
pub async fn load_leads(path: &Path) -> Result<LeadArray, AppError> {
    if !tokio::fs::try_exists(path).await.unwrap_or(false) {
        return Err(AppError::FileNotFound(path.to_path_buf()));
    }

    let content = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("Failed to read {}", path.display()))?;

    let leads = parse_lead_array(&content)?;

    if leads.pass == RepairPass::LineScan {
        tracing::warn!(
            "{} needed line-scan repair: {}",
            path.display(),
            leads.strict_error.as_deref().unwrap_or("unknown parse error")
        );
    }
    tracing::info!("Loaded {} lead records from {}", leads.records.len(), path.display());

    Ok(leads)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[tokio::test]
    async fn test_missing_file() {
        let err = load_leads(Path::new("/definitely/not/here/leads.json"))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::FileNotFound(_)));
    }

    #[tokio::test]
    async fn test_load_with_trailing_comma() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "[\n  {{\"business_name\": \"Acme\"}},\n]").unwrap();

        let leads = load_leads(file.path()).await.unwrap();
        assert_eq!(leads.records.len(), 1);
        assert_eq!(leads.pass, RepairPass::Strict);
    }
}
