//! Member and method naming conventions
//!
//! A member called `firstName` is read through `firstName`, `getFirstName`
//! or `isFirstName` and written through `setFirstName`.

/// Uppercase the first character
#[must_use]
pub fn capitalize(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Getter method names tried for a member, in lookup order
///
/// The bare name is only a candidate when it starts lowercase and is not
/// entirely lowercase (`fullName` yes, `name` or `Name` no).
#[must_use]
pub fn getter_candidates(name: &str) -> Vec<String> {
    let mut candidates = Vec::with_capacity(3);
    if name.is_empty() {
        return candidates;
    }
    let starts_lower = name.chars().next().is_some_and(char::is_lowercase);
    let all_lower = !name.chars().any(char::is_uppercase);
    if starts_lower && !all_lower {
        candidates.push(name.to_string());
    }
    let cap = capitalize(name);
    candidates.push(format!("get{cap}"));
    candidates.push(format!("is{cap}"));
    candidates
}

/// Setter method name paired with a member
#[must_use]
pub fn setter_name(name: &str) -> String {
    format!("set{}", capitalize(name))
}

/// Member name exposed by a getter method (`getAge` → `Age`)
///
/// Returns `None` for methods that do not follow the getter convention.
#[must_use]
pub fn member_name_of(method: &str) -> Option<&str> {
    let rest = method
        .strip_prefix("get")
        .or_else(|| method.strip_prefix("is"))?;
    rest.chars()
        .next()
        .filter(|c| c.is_uppercase())
        .map(|_| rest)
}

/// Human readable label for a member or type name
///
/// Inserts a space before every interior uppercase letter and capitalizes
/// the first: `firstName` → `First Name`, `DateOfBirth` → `Date Of Birth`.
#[must_use]
pub fn create_label(name: &str) -> String {
    let name = name.trim_start_matches('_');
    let mut label = String::with_capacity(name.len() + 4);
    for (i, c) in name.chars().enumerate() {
        if i == 0 {
            label.extend(c.to_uppercase());
            continue;
        }
        if c.is_uppercase() && !label.ends_with(' ') {
            label.push(' ');
        }
        label.push(if c == '_' { ' ' } else { c });
    }
    label
}
