use super::NewBillState;
use billed_api::endpoints::bills::{Bill, NewReceipt};
use billed_api::endpoints::BillStatus;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Content types a receipt may have
pub const ALLOWED_CONTENT_TYPES: [&str; 3] = ["image/jpeg", "image/png", "image/jpg"];

/// VAT percentage used when the field is left empty
pub const DEFAULT_PCT: i64 = 20;

/// Rejections of the New Bill form; `Display` is the alert text.
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("Veuillez renseigner une date")]
    MissingDate,
    #[error("Le taux de TVA doit être compris entre 0 et 100")]
    InvalidPct,
    #[error("Le montant doit être supérieur à 0")]
    InvalidAmount,
    #[error("Veuillez choisir un fichier au format jpg, jpeg ou png")]
    InvalidFileFormat,
    #[error("Veuillez joindre un justificatif")]
    MissingReceipt,
    #[error("Impossible de lire le fichier {}", path.display())]
    UnreadableFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Declared content type of a file, from its extension
pub fn content_type_for(path: &Path) -> Option<&'static str> {
    let extension = path.extension()?.to_str()?.to_ascii_lowercase();
    let content_type = match extension.as_str() {
        "jpg" | "jpeg" => "image/jpeg",
        "png" => "image/png",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "pdf" => "application/pdf",
        "txt" => "text/plain",
        _ => return None,
    };
    Some(content_type)
}

pub fn is_allowed_content_type(content_type: &str) -> bool {
    ALLOWED_CONTENT_TYPES.contains(&content_type)
}

/// Check the file's declared type and read it for a later upload
pub fn load_receipt(path: &Path) -> Result<NewReceipt, ValidationError> {
    let content_type = content_type_for(path)
        .filter(|content_type| is_allowed_content_type(content_type))
        .ok_or(ValidationError::InvalidFileFormat)?;

    let file_name = path
        .file_name()
        .and_then(|name| name.to_str())
        .ok_or(ValidationError::InvalidFileFormat)?
        .to_string();

    let bytes = std::fs::read(path).map_err(|source| ValidationError::UnreadableFile {
        path: path.to_path_buf(),
        source,
    })?;

    Ok(NewReceipt {
        file_name,
        content_type: content_type.to_string(),
        bytes,
    })
}

/// Validate the form and build the pending bill plus the receipt to upload.
/// Checks run in order: date, pct, amount, receipt.
pub fn validate_new_bill(
    form: &NewBillState,
    email: &str,
) -> Result<(Bill, NewReceipt), ValidationError> {
    let date = validate_date(&form.date)?;
    let pct = validate_pct(&form.pct)?;
    let amount = validate_amount(&form.amount)?;
    let receipt = form
        .receipt
        .clone()
        .ok_or(ValidationError::MissingReceipt)?;

    let bill = Bill {
        email: email.to_string(),
        expense_type: form.expense_type.clone(),
        name: form.expense_name.trim().to_string(),
        amount,
        date,
        vat: form.vat.trim().to_string(),
        pct,
        commentary: form.commentary.clone(),
        file_url: None,
        file_name: Some(receipt.file_name.clone()),
        status: BillStatus::Pending,
        ..Default::default()
    };

    Ok((bill, receipt))
}

fn validate_date(input: &str) -> Result<String, ValidationError> {
    let date = input.trim();
    if date.is_empty() {
        return Err(ValidationError::MissingDate);
    }
    Ok(date.to_string())
}

fn validate_pct(input: &str) -> Result<i64, ValidationError> {
    let pct = input.trim().parse::<i64>().unwrap_or(DEFAULT_PCT);
    if (0..=100).contains(&pct) {
        Ok(pct)
    } else {
        Err(ValidationError::InvalidPct)
    }
}

fn validate_amount(input: &str) -> Result<i64, ValidationError> {
    match input.trim().parse::<i64>() {
        Ok(amount) if amount > 0 => Ok(amount),
        _ => Err(ValidationError::InvalidAmount),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn receipt() -> NewReceipt {
        NewReceipt {
            file_name: "facture.jpg".to_string(),
            content_type: "image/jpeg".to_string(),
            bytes: vec![0xff, 0xd8],
        }
    }

    fn valid_form() -> NewBillState {
        NewBillState {
            expense_type: "Transports".to_string(),
            expense_name: "Vol Paris Londres".to_string(),
            date: "2022-04-04".to_string(),
            amount: "348".to_string(),
            vat: "70".to_string(),
            pct: "20".to_string(),
            commentary: "".to_string(),
            receipt: Some(receipt()),
            ..Default::default()
        }
    }

    #[test]
    fn builds_pending_bill_from_valid_form() {
        let (bill, upload) = validate_new_bill(&valid_form(), "jane.doe@x.com").unwrap();
        assert_eq!(bill.status, BillStatus::Pending);
        assert_eq!(bill.email, "jane.doe@x.com");
        assert_eq!(bill.amount, 348);
        assert_eq!(bill.pct, 20);
        assert_eq!(bill.date, "2022-04-04");
        assert_eq!(bill.file_name.as_deref(), Some("facture.jpg"));
        assert!(bill.file_url.is_none());
        assert!(bill.id.is_empty());
        assert_eq!(upload, receipt());
    }

    #[test]
    fn empty_pct_defaults_to_twenty() {
        let form = NewBillState {
            pct: String::new(),
            ..valid_form()
        };
        let (bill, _) = validate_new_bill(&form, "a@x").unwrap();
        assert_eq!(bill.pct, DEFAULT_PCT);
    }

    #[test]
    fn zero_pct_is_kept() {
        let form = NewBillState {
            pct: "0".to_string(),
            ..valid_form()
        };
        assert_eq!(validate_new_bill(&form, "a@x").unwrap().0.pct, 0);
    }

    #[test]
    fn pct_out_of_range_is_rejected() {
        let form = NewBillState {
            pct: "150".to_string(),
            ..valid_form()
        };
        let err = validate_new_bill(&form, "a@x").unwrap_err();
        assert!(matches!(err, ValidationError::InvalidPct));
        assert_eq!(
            err.to_string(),
            "Le taux de TVA doit être compris entre 0 et 100"
        );
    }

    #[test]
    fn zero_or_garbage_amount_is_rejected() {
        for amount in ["0", "-12", "", "douze"] {
            let form = NewBillState {
                amount: amount.to_string(),
                ..valid_form()
            };
            assert!(matches!(
                validate_new_bill(&form, "a@x"),
                Err(ValidationError::InvalidAmount)
            ));
        }
    }

    #[test]
    fn empty_date_is_rejected() {
        let form = NewBillState {
            date: "  ".to_string(),
            ..valid_form()
        };
        let err = validate_new_bill(&form, "a@x").unwrap_err();
        assert_eq!(err.to_string(), "Veuillez renseigner une date");
    }

    #[test]
    fn date_is_checked_before_pct_and_amount() {
        let form = NewBillState {
            date: String::new(),
            pct: "150".to_string(),
            amount: "0".to_string(),
            ..valid_form()
        };
        assert!(matches!(
            validate_new_bill(&form, "a@x"),
            Err(ValidationError::MissingDate)
        ));

        let form = NewBillState {
            pct: "150".to_string(),
            amount: "0".to_string(),
            ..valid_form()
        };
        assert!(matches!(
            validate_new_bill(&form, "a@x"),
            Err(ValidationError::InvalidPct)
        ));
    }

    #[test]
    fn missing_receipt_is_rejected() {
        let form = NewBillState {
            receipt: None,
            ..valid_form()
        };
        assert!(matches!(
            validate_new_bill(&form, "a@x"),
            Err(ValidationError::MissingReceipt)
        ));
    }

    #[test]
    fn content_type_follows_extension() {
        assert_eq!(content_type_for(Path::new("a.JPG")), Some("image/jpeg"));
        assert_eq!(content_type_for(Path::new("a.png")), Some("image/png"));
        assert_eq!(content_type_for(Path::new("a.pdf")), Some("application/pdf"));
        assert_eq!(content_type_for(Path::new("noext")), None);
        assert!(is_allowed_content_type("image/jpg"));
        assert!(!is_allowed_content_type("application/pdf"));
    }

    #[test]
    fn load_receipt_reads_allowed_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ticket.png");
        std::fs::File::create(&path)
            .unwrap()
            .write_all(b"\x89PNG")
            .unwrap();

        let receipt = load_receipt(&path).unwrap();
        assert_eq!(receipt.file_name, "ticket.png");
        assert_eq!(receipt.content_type, "image/png");
        assert_eq!(receipt.bytes, b"\x89PNG");
    }

    #[test]
    fn load_receipt_rejects_other_formats_without_reading() {
        let err = load_receipt(Path::new("/does/not/exist/notes.pdf")).unwrap_err();
        assert!(matches!(err, ValidationError::InvalidFileFormat));
    }

    #[test]
    fn load_receipt_reports_missing_file() {
        let err = load_receipt(Path::new("/does/not/exist/ticket.jpg")).unwrap_err();
        assert!(matches!(err, ValidationError::UnreadableFile { .. }));
    }
}
