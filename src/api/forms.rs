use axum::extract::Multipart;

use super::ApiError;
use crate::services::{EntryForm, UploadedImage};

/// Parse the create/edit multipart request into a typed payload. Unknown
/// fields are ignored; a file part without a filename or without content
/// counts as "no image supplied", matching how browsers submit an empty
/// file input.
pub async fn parse_entry_form(mut multipart: Multipart) -> Result<EntryForm, ApiError> {
    let mut form = EntryForm::default();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::validation(format!("Malformed multipart request: {e}")))?
    {
        let name = field.name().map(ToOwned::to_owned);
        match name.as_deref() {
            Some("description") => {
                let text = field
                    .text()
                    .await
                    .map_err(|e| ApiError::validation(format!("Invalid description: {e}")))?;
                form.description = Some(text);
            }
            Some("image") => {
                let filename = field.file_name().map(ToOwned::to_owned).unwrap_or_default();
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| ApiError::validation(format!("Invalid image upload: {e}")))?;

                if !filename.is_empty() && !bytes.is_empty() {
                    form.image = Some(UploadedImage {
                        filename,
                        bytes: bytes.to_vec(),
                    });
                }
            }
            _ => {}
        }
    }

    Ok(form)
}
