//! Resource naming helpers
//!
//! Collection paths and envelope keys are both derived from the singular
//! entity name: `drink_category` becomes `/drink-categories` on the wire and
//! `drinkCategories` inside a hyperlinked envelope.

/// Utility for converting singular entity names into their resource forms
pub struct Pluralizer;

impl Pluralizer {
    /// Convert a singular noun to its plural form
    ///
    /// # Examples
    ///
    /// ```
    /// use barkeep::core::pluralize::Pluralizer;
    ///
    /// assert_eq!(Pluralizer::pluralize("drink"), "drinks");
    /// assert_eq!(Pluralizer::pluralize("category"), "categories");
    /// assert_eq!(Pluralizer::pluralize("glass"), "glasses");
    /// ```
    pub fn pluralize(singular: &str) -> String {
        if singular.is_empty() {
            return singular.to_string();
        }

        match singular {
            // Irregular nouns that show up in entity names
            "person" => "persons".to_string(),
            "child" => "children".to_string(),

            // Consonant + y -> ies
            s if s.ends_with('y')
                && s.len() > 1
                && !matches!(
                    s.as_bytes()[s.len() - 2],
                    b'a' | b'e' | b'i' | b'o' | b'u'
                ) =>
            {
                format!("{}ies", &s[..s.len() - 1])
            }

            // Sibilants -> es
            s if s.ends_with('s')
                || s.ends_with("sh")
                || s.ends_with("ch")
                || s.ends_with('x')
                || s.ends_with('z') =>
            {
                format!("{}es", s)
            }

            s => format!("{}s", s),
        }
    }

    /// Plural form of a snake_case or kebab-case name, pluralizing the last word only
    ///
    /// ```
    /// use barkeep::core::pluralize::Pluralizer;
    ///
    /// assert_eq!(Pluralizer::pluralize_compound("drink_category"), "drink_categories");
    /// ```
    pub fn pluralize_compound(name: &str) -> String {
        match name.rfind(['_', '-']) {
            Some(idx) => format!(
                "{}{}",
                &name[..=idx],
                Self::pluralize(&name[idx + 1..])
            ),
            None => Self::pluralize(name),
        }
    }

    /// Collection path segment: plural, kebab-case (`drink_category` -> `drink-categories`)
    pub fn collection_path(singular: &str) -> String {
        Self::pluralize_compound(singular).replace('_', "-")
    }

    /// Envelope key: plural, lowerCamelCase (`drink_category` -> `drinkCategories`)
    pub fn embedded_key(singular: &str) -> String {
        Self::to_lower_camel(&Self::pluralize_compound(singular))
    }

    /// Convert snake_case or kebab-case to lowerCamelCase
    pub fn to_lower_camel(name: &str) -> String {
        let mut out = String::with_capacity(name.len());
        let mut upper_next = false;
        for c in name.chars() {
            if c == '_' || c == '-' {
                upper_next = !out.is_empty();
            } else if upper_next {
                out.extend(c.to_uppercase());
                upper_next = false;
            } else {
                out.push(c);
            }
        }
        out
    }
}
