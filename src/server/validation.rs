use crate::server::response::ApiError;

const MAX_CATEGORY_NAME_LEN: usize = 100;

pub fn validate_category_name(name: &str) -> Result<(), ApiError> {
    if name.is_empty() {
        return Err(ApiError::bad_request("Category name is required"));
    }
    if name.len() > MAX_CATEGORY_NAME_LEN {
        return Err(ApiError::bad_request(format!(
            "Category name cannot exceed {MAX_CATEGORY_NAME_LEN} characters"
        )));
    }
    Ok(())
}

pub fn validate_plays(plays: i64) -> Result<(), ApiError> {
    if plays < 0 {
        return Err(ApiError::bad_request("Play count cannot be negative"));
    }
    Ok(())
}
