//! Class names for emitted definitions.

use crate::types::Role;

/// Upper-case the first character of every whitespace-separated word.
///
/// The rest of each word is left as-is: `"secondName"` becomes `"SecondName"`.
pub fn title_case(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut word_start = true;
    for c in text.chars() {
        if word_start {
            out.extend(c.to_uppercase());
        } else {
            out.push(c);
        }
        word_start = c.is_whitespace();
    }
    out
}

/// Title-cased concatenation of every dotted segment above the leaf.
///
/// `"order.customer.address.city"` gives `"OrderCustomerAddress"`; a key
/// without dots gives an empty string.
pub fn path_suffix(key: &str) -> String {
    match key.rsplit_once('.') {
        Some((ancestors, _)) => ancestors.split('.').map(title_case).collect(),
        None => String::new(),
    }
}

/// Name of the class generated for a group.
///
/// Root groups are named after the entity; nested groups after their own
/// (title-cased) name.
pub fn class_name(prefix: &str, entity: &str, group: &str, is_root: bool, role: Role) -> String {
    let base = if is_root {
        entity.to_string()
    } else {
        nested_base_name(group)
    };
    format!("{}{}{}", prefix, base, role.postfix())
}

fn nested_base_name(group: &str) -> String {
    let leaf = group.rsplit('.').next().unwrap_or(group);
    format!("{}{}", title_case(leaf), path_suffix(group))
}
