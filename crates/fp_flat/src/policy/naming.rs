use alloc::string::String;

use fp_reflect::info::NamedField;

// -----------------------------------------------------------------------------
// NamingPolicy

/// Translates a field into its document member name.
///
/// Only consulted for fields without `#[reflect(rename = "...")]`.
/// Closures taking a [`NamedField`] are naming policies too:
///
/// ```
/// use fp_flat::policy::NamingPolicy;
/// use fp_reflect::derive::Reflect;
/// use fp_reflect::info::Typed;
///
/// #[derive(Reflect)]
/// struct Part {
///     part_name: String,
/// }
///
/// let policy = |field: &fp_reflect::info::NamedField| field.name().to_uppercase();
/// let field = Part::type_info().as_struct().unwrap().field("part_name").unwrap();
/// assert_eq!(policy.translate_name(field), "PART_NAME");
/// ```
pub trait NamingPolicy: Send + Sync {
    fn translate_name(&self, field: &NamedField) -> String;
}

impl<F> NamingPolicy for F
where
    F: Fn(&NamedField) -> String + Send + Sync,
{
    #[inline]
    fn translate_name(&self, field: &NamedField) -> String {
        self(field)
    }
}

// -----------------------------------------------------------------------------
// FieldNamingPolicy

/// Common naming conventions, applied to `snake_case` field identifiers.
///
/// Leading underscores are kept as they are.
///
/// | variant                       | `_item_name`  |
/// |-------------------------------|---------------|
/// | `Identity`                    | `_item_name`  |
/// | `LowerCamelCase`              | `_itemName`   |
/// | `UpperCamelCase`              | `_ItemName`   |
/// | `UpperCamelCaseWithSpaces`    | `_Item Name`  |
/// | `LowerCaseWithUnderscores`    | `_item_name`  |
/// | `LowerCaseWithDashes`         | `_item-name`  |
/// | `LowerCaseWithDots`           | `_item.name`  |
/// | `ScreamingSnakeCase`          | `_ITEM_NAME`  |
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum FieldNamingPolicy {
    #[default]
    Identity,
    LowerCamelCase,
    UpperCamelCase,
    UpperCamelCaseWithSpaces,
    LowerCaseWithUnderscores,
    LowerCaseWithDashes,
    LowerCaseWithDots,
    ScreamingSnakeCase,
}

impl FieldNamingPolicy {
    /// Applies the convention to a raw identifier.
    ///
    /// ```
    /// use fp_flat::policy::FieldNamingPolicy;
    ///
    /// assert_eq!(FieldNamingPolicy::LowerCamelCase.apply("part_name"), "partName");
    /// assert_eq!(FieldNamingPolicy::LowerCaseWithDashes.apply("part_name"), "part-name");
    /// ```
    pub fn apply(self, ident: &str) -> String {
        let rest = ident.trim_start_matches('_');
        let mut out = String::with_capacity(ident.len() + 2);
        out.push_str(&ident[..ident.len() - rest.len()]);

        let words = rest.split('_').filter(|word| !word.is_empty());
        match self {
            Self::Identity => out.push_str(rest),
            Self::LowerCamelCase => {
                for (i, word) in words.enumerate() {
                    if i == 0 {
                        out.push_str(word);
                    } else {
                        push_capitalized(&mut out, word);
                    }
                }
            }
            Self::UpperCamelCase => words.for_each(|word| push_capitalized(&mut out, word)),
            Self::UpperCamelCaseWithSpaces => {
                for (i, word) in words.enumerate() {
                    if i > 0 {
                        out.push(' ');
                    }
                    push_capitalized(&mut out, word);
                }
            }
            Self::LowerCaseWithUnderscores => push_joined(&mut out, words, '_', false),
            Self::LowerCaseWithDashes => push_joined(&mut out, words, '-', false),
            Self::LowerCaseWithDots => push_joined(&mut out, words, '.', false),
            Self::ScreamingSnakeCase => push_joined(&mut out, words, '_', true),
        }
        out
    }
}

impl NamingPolicy for FieldNamingPolicy {
    #[inline]
    fn translate_name(&self, field: &NamedField) -> String {
        self.apply(field.name())
    }
}

fn push_capitalized(out: &mut String, word: &str) {
    let mut chars = word.chars();
    if let Some(first) = chars.next() {
        out.extend(first.to_uppercase());
        out.push_str(chars.as_str());
    }
}

fn push_joined<'a>(
    out: &mut String,
    words: impl Iterator<Item = &'a str>,
    separator: char,
    upper: bool,
) {
    for (i, word) in words.enumerate() {
        if i > 0 {
            out.push(separator);
        }
        if upper {
            out.extend(word.chars().flat_map(char::to_uppercase));
        } else {
            out.extend(word.chars().flat_map(char::to_lowercase));
        }
    }
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use super::FieldNamingPolicy::{self, *};

    fn check(policy: FieldNamingPolicy, input: &str, expected: &str) {
        assert_eq!(policy.apply(input), expected, "{policy:?} on `{input}`");
    }

    #[test]
    fn conventions() {
        check(Identity, "item_name", "item_name");
        check(LowerCamelCase, "item_name", "itemName");
        check(UpperCamelCase, "item_name", "ItemName");
        check(UpperCamelCaseWithSpaces, "item_name", "Item Name");
        check(LowerCaseWithUnderscores, "item_name", "item_name");
        check(LowerCaseWithDashes, "item_name", "item-name");
        check(LowerCaseWithDots, "item_name", "item.name");
        check(ScreamingSnakeCase, "item_name", "ITEM_NAME");
    }

    #[test]
    fn single_word_and_underscores() {
        check(LowerCamelCase, "name", "name");
        check(UpperCamelCase, "name", "Name");
        check(LowerCamelCase, "_secret_key", "_secretKey");
        check(UpperCamelCaseWithSpaces, "__a__b", "__A B");
        check(LowerCaseWithDashes, "volts_2", "volts-2");
    }
}
