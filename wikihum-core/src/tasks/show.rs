//! Human-readable dump of an entity's statements.

use crate::{Entity, EntityId, EntityStore, Snak, StoreError};

fn snak_text(snak: &Snak) -> String {
    snak.datavalue
        .as_ref()
        .map_or_else(|| snak.snak_type.as_str().to_owned(), ToString::to_string)
}

/// Lines describing every statement of `entity`.
///
/// Each statement gives one `property value` line, followed by indented
/// qualifier lines and one indented line per reference.
#[must_use]
pub fn describe(entity: &Entity) -> Vec<String> {
    let mut lines = vec![entity.id.to_string()];
    for statement in entity.statements.iter() {
        let id = statement
            .id
            .as_ref()
            .map(|id| format!(" [{id}]"))
            .unwrap_or_default();
        lines.push(format!(
            "{} {}{id}",
            statement.property(),
            snak_text(&statement.main_snak)
        ));
        for qualifier in statement.qualifiers.iter() {
            lines.push(format!("  {} {}", qualifier.property, snak_text(qualifier)));
        }
        for reference in &statement.references {
            let snaks: Vec<String> = reference
                .snaks
                .iter()
                .map(|snak| format!("{} {}", snak.property, snak_text(snak)))
                .collect();
            lines.push(format!("  reference: {}", snaks.join("; ")));
        }
    }
    lines
}

/// Load `id` and describe it.
pub fn run(store: &dyn EntityStore, id: &EntityId) -> Result<Vec<String>, StoreError> {
    store.get(id).map(|entity| describe(&entity))
}
