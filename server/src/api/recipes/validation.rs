use crate::api::FieldError;
use url::Url;

use super::create::CreateRecipeRequest;
use super::update::UpdateRecipeRequest;

pub fn is_http_url(raw: &str) -> bool {
    Url::parse(raw)
        .map(|u| matches!(u.scheme(), "http" | "https"))
        .unwrap_or(false)
}

pub fn validate_create(req: &CreateRecipeRequest) -> Vec<FieldError> {
    let mut details = Vec::new();

    if req.title.trim().is_empty() {
        details.push(FieldError::new("title", "Title is required"));
    }
    if req.description.trim().is_empty() {
        details.push(FieldError::new("description", "Description is required"));
    }
    if req.prep_time < 0 {
        details.push(FieldError::new(
            "prepTime",
            "Prep time must be a non-negative integer",
        ));
    }
    if req.cook_time < 0 {
        details.push(FieldError::new(
            "cookTime",
            "Cook time must be a non-negative integer",
        ));
    }
    if req.servings < 1 {
        details.push(FieldError::new(
            "servings",
            "Servings must be a positive integer",
        ));
    }
    if !is_http_url(&req.image_url) {
        details.push(FieldError::new("imageUrl", "Image URL must be a valid URL"));
    }
    if req.ingredients.is_empty() {
        details.push(FieldError::new(
            "ingredients",
            "At least one ingredient is required",
        ));
    } else if req.ingredients.iter().any(|i| i.name.trim().is_empty()) {
        details.push(FieldError::new(
            "ingredients",
            "Ingredient name cannot be empty",
        ));
    }
    if req.instructions.is_empty() {
        details.push(FieldError::new(
            "instructions",
            "At least one instruction is required",
        ));
    }
    if req.affiliate_links.iter().any(|l| !is_http_url(&l.url)) {
        details.push(FieldError::new(
            "affiliateLinks",
            "Affiliate link URL must be a valid URL",
        ));
    }

    details
}

/// Update payloads are partial; only provided fields are checked.
pub fn validate_update(req: &UpdateRecipeRequest) -> Vec<FieldError> {
    let mut details = Vec::new();

    if let Some(ref title) = req.title {
        if title.trim().is_empty() {
            details.push(FieldError::new("title", "Title cannot be empty"));
        }
    }
    if let Some(ref description) = req.description {
        if description.trim().is_empty() {
            details.push(FieldError::new(
                "description",
                "Description cannot be empty",
            ));
        }
    }
    if req.prep_time.is_some_and(|v| v < 0) {
        details.push(FieldError::new(
            "prepTime",
            "Prep time must be a non-negative integer",
        ));
    }
    if req.cook_time.is_some_and(|v| v < 0) {
        details.push(FieldError::new(
            "cookTime",
            "Cook time must be a non-negative integer",
        ));
    }
    if req.servings.is_some_and(|v| v < 1) {
        details.push(FieldError::new(
            "servings",
            "Servings must be a positive integer",
        ));
    }
    if let Some(ref image_url) = req.image_url {
        if !is_http_url(image_url) {
            details.push(FieldError::new("imageUrl", "Image URL must be a valid URL"));
        }
    }
    if let Some(ref ingredients) = req.ingredients {
        if ingredients.iter().any(|i| i.name.trim().is_empty()) {
            details.push(FieldError::new(
                "ingredients",
                "Ingredient name cannot be empty",
            ));
        }
    }
    if let Some(ref links) = req.affiliate_links {
        if links.iter().any(|l| !is_http_url(&l.url)) {
            details.push(FieldError::new(
                "affiliateLinks",
                "Affiliate link URL must be a valid URL",
            ));
        }
    }

    details
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Difficulty, IngredientInput, NutritionInput};

    fn valid_create() -> CreateRecipeRequest {
        CreateRecipeRequest {
            title: "Scrambled eggs".to_string(),
            description: "Fast breakfast".to_string(),
            prep_time: 10,
            cook_time: 20,
            servings: 2,
            difficulty: Difficulty::Easy,
            image_url: "https://x/y.jpg".to_string(),
            is_favorite: false,
            ingredients: vec![IngredientInput {
                name: "Egg".to_string(),
                quantity: "2".to_string(),
                unit: "ea".to_string(),
                notes: None,
            }],
            instructions: vec!["Crack eggs".to_string(), "Cook".to_string()],
            dietary_tags: vec![],
            nutrition: NutritionInput {
                calories: 100.0,
                protein: 5.0,
                carbs: 1.0,
                fat: 8.0,
                sugar: None,
                fiber: None,
                sodium: None,
            },
            affiliate_links: vec![],
        }
    }

    #[test]
    fn valid_create_payload_passes() {
        assert!(validate_create(&valid_create()).is_empty());
    }

    #[test]
    fn create_rejects_blank_title_and_description() {
        let mut req = valid_create();
        req.title = "   ".to_string();
        req.description = String::new();
        let fields: Vec<_> = validate_create(&req).into_iter().map(|d| d.field).collect();
        assert!(fields.contains(&"title".to_string()));
        assert!(fields.contains(&"description".to_string()));
    }

    #[test]
    fn create_rejects_negative_times_and_zero_servings() {
        let mut req = valid_create();
        req.prep_time = -1;
        req.cook_time = -5;
        req.servings = 0;
        let fields: Vec<_> = validate_create(&req).into_iter().map(|d| d.field).collect();
        assert_eq!(fields, vec!["prepTime", "cookTime", "servings"]);
    }

    #[test]
    fn create_rejects_non_url_image() {
        let mut req = valid_create();
        req.image_url = "not a url".to_string();
        assert_eq!(validate_create(&req)[0].field, "imageUrl");
    }

    #[test]
    fn create_requires_ingredients_and_instructions() {
        let mut req = valid_create();
        req.ingredients.clear();
        req.instructions.clear();
        let fields: Vec<_> = validate_create(&req).into_iter().map(|d| d.field).collect();
        assert_eq!(fields, vec!["ingredients", "instructions"]);
    }

    #[test]
    fn empty_update_payload_is_valid() {
        let req = UpdateRecipeRequest::default();
        assert!(validate_update(&req).is_empty());
    }

    #[test]
    fn update_checks_only_provided_fields() {
        let req = UpdateRecipeRequest {
            title: Some("  ".to_string()),
            servings: Some(0),
            ..Default::default()
        };
        let fields: Vec<_> = validate_update(&req).into_iter().map(|d| d.field).collect();
        assert_eq!(fields, vec!["title", "servings"]);
    }

    #[test]
    fn url_check_requires_http_scheme() {
        assert!(is_http_url("https://example.com/pan"));
        assert!(is_http_url("http://example.com"));
        assert!(!is_http_url("ftp://example.com"));
        assert!(!is_http_url("example.com"));
    }
}
