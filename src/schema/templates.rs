//! Built-in starter schemas
//!
//! Each template carries a ready-made field tree for a common document
//! shape. Trees are built fresh on every call so loading the same
//! template twice never shares field ids.

use super::types::Field;

/// A named, categorized starter field tree.
#[derive(Debug, Clone, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SchemaTemplate {
    pub id: String,
    pub name: String,
    pub description: String,
    pub category: String,
    pub fields: Vec<Field>,
}

/// Returns the full built-in template catalog.
pub fn builtin_templates() -> Vec<SchemaTemplate> {
    vec![
        user_profile(),
        product(),
        blog_post(),
        api_response(),
        website_config(),
        mobile_app_config(),
    ]
}

fn template(
    id: &str,
    name: &str,
    description: &str,
    category: &str,
    fields: Vec<Field>,
) -> SchemaTemplate {
    SchemaTemplate {
        id: id.to_string(),
        name: name.to_string(),
        description: description.to_string(),
        category: category.to_string(),
        fields,
    }
}

fn user_profile() -> SchemaTemplate {
    template(
        "user-profile",
        "User Profile",
        "Basic user profile with personal information",
        "User Management",
        vec![
            Field::number("id", 1.0),
            Field::string("firstName", "John"),
            Field::string("lastName", "Doe"),
            Field::string("email", "john.doe@example.com"),
            Field::number("age", 30.0),
            Field::nested(
                "address",
                vec![
                    Field::string("street", "123 Main St"),
                    Field::string("city", "New York"),
                    Field::string("zipCode", "10001"),
                    Field::string("country", "USA"),
                ],
            ),
        ],
    )
}

fn product() -> SchemaTemplate {
    template(
        "product",
        "E-commerce Product",
        "Product schema for e-commerce applications",
        "E-commerce",
        vec![
            Field::number("id", 1.0),
            Field::string("name", "Product Name"),
            Field::string("description", "Product description"),
            Field::number("price", 99.99),
            Field::string("currency", "USD"),
            Field::number("inStock", 1.0),
            Field::string("category", "Electronics"),
            Field::nested(
                "specifications",
                vec![
                    Field::number("weight", 1.5),
                    Field::string("dimensions", "10x5x2 inches"),
                    Field::string("color", "Black"),
                ],
            ),
        ],
    )
}

fn blog_post() -> SchemaTemplate {
    template(
        "blog-post",
        "Blog Post",
        "Blog post schema with metadata",
        "Content Management",
        vec![
            Field::number("id", 1.0),
            Field::string("title", "Blog Post Title"),
            Field::string("content", "Blog post content..."),
            Field::string("excerpt", "Short excerpt"),
            Field::string("publishedAt", "2024-01-01T00:00:00Z"),
            Field::string("status", "published"),
            Field::nested(
                "author",
                vec![
                    Field::string("name", "Author Name"),
                    Field::string("email", "author@example.com"),
                    Field::string("bio", "Author biography"),
                ],
            ),
            Field::nested(
                "metadata",
                vec![
                    Field::string("tags", "tag1,tag2,tag3"),
                    Field::number("readTime", 5.0),
                    Field::number("views", 0.0),
                ],
            ),
        ],
    )
}

fn api_response() -> SchemaTemplate {
    template(
        "api-response",
        "API Response",
        "Standard API response structure",
        "API",
        vec![
            Field::number("success", 1.0),
            Field::string("message", "Request successful"),
            Field::number("statusCode", 200.0),
            Field::string("timestamp", "2024-01-01T00:00:00Z"),
            Field::nested(
                "data",
                vec![
                    Field::number("id", 1.0),
                    Field::string("name", "Sample Data"),
                    Field::string("value", "Sample Value"),
                ],
            ),
            Field::nested(
                "pagination",
                vec![
                    Field::number("page", 1.0),
                    Field::number("limit", 10.0),
                    Field::number("total", 100.0),
                    Field::number("hasNext", 1.0),
                ],
            ),
        ],
    )
}

fn website_config() -> SchemaTemplate {
    template(
        "website-config",
        "Website Configuration",
        "Website configuration and settings",
        "Configuration",
        vec![
            Field::string("siteName", "My Website"),
            Field::string("description", "Website description"),
            Field::string("url", "https://example.com"),
            Field::string("language", "en"),
            Field::nested(
                "theme",
                vec![
                    Field::string("primaryColor", "#007bff"),
                    Field::string("secondaryColor", "#6c757d"),
                    Field::number("darkMode", 0.0),
                ],
            ),
            Field::nested(
                "features",
                vec![
                    Field::number("comments", 1.0),
                    Field::number("newsletter", 1.0),
                    Field::number("analytics", 1.0),
                ],
            ),
        ],
    )
}

fn mobile_app_config() -> SchemaTemplate {
    template(
        "mobile-app-config",
        "Mobile App Config",
        "Mobile application configuration",
        "Mobile",
        vec![
            Field::string("appName", "My Mobile App"),
            Field::string("version", "1.0.0"),
            Field::number("buildNumber", 1.0),
            Field::nested(
                "api",
                vec![
                    Field::string("baseUrl", "https://api.example.com"),
                    Field::number("timeout", 30000.0),
                    Field::number("retries", 3.0),
                ],
            ),
            Field::nested(
                "features",
                vec![
                    Field::number("pushNotifications", 1.0),
                    Field::number("biometricAuth", 1.0),
                    Field::number("offlineMode", 0.0),
                ],
            ),
        ],
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::types::collect_ids;
    use crate::schema::validation::validate_json;
    use crate::schema::export::derive_json;
    use std::collections::HashSet;

    #[test]
    fn test_catalog_ids_are_unique() {
        let templates = builtin_templates();
        let ids: HashSet<_> = templates.iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids.len(), templates.len());
    }

    #[test]
    fn test_fresh_field_ids_per_call() {
        let first = builtin_templates();
        let second = builtin_templates();
        let first_ids: HashSet<_> = collect_ids(&first[0].fields).into_iter().collect();
        let second_ids: HashSet<_> = collect_ids(&second[0].fields).into_iter().collect();
        assert!(first_ids.is_disjoint(&second_ids));
    }

    #[test]
    fn test_every_template_derives_valid_sample() {
        for template in builtin_templates() {
            let sample = derive_json(&template.fields);
            let report = validate_json(&sample, &template.fields);
            assert!(
                report.is_valid,
                "{}: {:?}",
                template.name, report.errors
            );
        }
    }

    #[test]
    fn test_user_profile_shape() {
        let templates = builtin_templates();
        let profile = templates.iter().find(|t| t.id == "user-profile").unwrap();
        let sample = derive_json(&profile.fields);
        assert_eq!(sample["firstName"], "John");
        assert_eq!(sample["address"]["city"], "New York");
    }
}
