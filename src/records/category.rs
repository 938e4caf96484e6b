use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::{Error, generic_error};

/// The role a delivered file plays in the pipeline
///
/// The name doubles as the folder the file is copied into below the shot.
/// `Ignore` keeps a file out of the integration entirely.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Category {
    #[default]
    Plate,
    Texture,
    Model,
    Mocap,
    Reference,
    Ignore,
}

impl Category {
    /// Every category, in the order they are offered to the user
    pub const ALL: [Category; 6] = [
        Category::Plate,
        Category::Texture,
        Category::Model,
        Category::Mocap,
        Category::Reference,
        Category::Ignore,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Plate => "Plate",
            Category::Texture => "Texture",
            Category::Model => "Model",
            Category::Mocap => "Mocap",
            Category::Reference => "Reference",
            Category::Ignore => "Ignore",
        }
    }

    pub fn is_ignore(&self) -> bool {
        matches!(self, Category::Ignore)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::ALL
            .into_iter()
            .find(|category| category.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| {
                let known: Vec<&str> = Category::ALL.iter().map(Category::as_str).collect();
                generic_error(&format!(
                    "Unknown category '{s}', expected one of: {}",
                    known.join(", ")
                ))
            })
    }
}

impl TryFrom<String> for Category {
    type Error = Error;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Category> for String {
    fn from(category: Category) -> Self {
        category.as_str().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_is_case_insensitive() {
        assert_eq!("plate".parse::<Category>().unwrap(), Category::Plate);
        assert_eq!("MOCAP".parse::<Category>().unwrap(), Category::Mocap);
        assert_eq!(" Reference ".parse::<Category>().unwrap(), Category::Reference);
    }

    #[test]
    fn test_unknown_category_names_the_value() {
        let error = "elements".parse::<Category>().unwrap_err();
        let message = format!("{error}");
        assert!(message.contains("elements"), "{message}");
        assert!(message.contains("Plate, Texture"), "{message}");
    }

    #[test]
    fn test_display_matches_folder_name() {
        let names: Vec<String> = Category::ALL.iter().map(|c| c.to_string()).collect();
        assert_eq!(
            names,
            ["Plate", "Texture", "Model", "Mocap", "Reference", "Ignore"]
        );
    }

    #[test]
    fn test_only_ignore_is_ignore() {
        assert!(Category::Ignore.is_ignore());
        assert!(
            Category::ALL
                .iter()
                .filter(|c| c.is_ignore())
                .eq([Category::Ignore].iter())
        );
        assert_eq!(Category::default(), Category::Plate);
    }
}
