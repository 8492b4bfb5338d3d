//! Go-to-definition over a source text.

use rapid_common::{Position, Span};

use crate::symbol_index::SymbolIndex;

/// Where the name under the cursor is defined and used.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DefinitionResult {
    pub name: String,
    /// Span of the defining name; `None` when the name is not declared in the source.
    pub definition: Option<Span>,
    /// Uses of the same definition, excluding the declaration itself.
    pub references: Vec<Span>,
}

/// Analyze `source` and look up the name at `pos`.
///
/// Returns `None` when the source has a syntax error or no name is at `pos`.
pub fn find_definition(source: &str, pos: Position) -> Option<DefinitionResult> {
    let result = rapid_analysis::analyze(source);
    let index = SymbolIndex::from_program(result.program.as_ref()?);
    lookup(&index, pos)
}

pub fn lookup(index: &SymbolIndex, pos: Position) -> Option<DefinitionResult> {
    let occurrence = index.occurrence_at(pos)?;
    let definition = index
        .resolve(&occurrence.name, occurrence.span.start)
        .map(|s| s.def_span);
    let references = index
        .find_references_at(pos, false)
        .into_iter()
        .map(|r| r.span)
        .collect();

    Some(DefinitionResult {
        name: occurrence.name.clone(),
        definition,
        references,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const SOURCE: &str = "MODULE M
PROC Main()
    Helper;
    Helper;
ENDPROC
PROC Helper()
    Missing;
ENDPROC
ENDMODULE";

    #[test]
    fn test_definition_from_call_site() {
        let found = find_definition(SOURCE, Position::new(3, 6)).unwrap();
        assert_eq!(found.name, "Helper");
        assert_eq!(found.definition, Some(Span::from_coords(6, 6, 6, 12)));
        assert_eq!(
            found.references,
            vec![Span::from_coords(3, 5, 3, 11), Span::from_coords(4, 5, 4, 11)]
        );
    }

    #[test]
    fn test_undeclared_name() {
        let found = find_definition(SOURCE, Position::new(7, 5)).unwrap();
        assert_eq!(found.name, "Missing");
        assert_eq!(found.definition, None);
        assert_eq!(found.references.len(), 1);
    }

    #[test]
    fn test_nothing_under_cursor() {
        assert!(find_definition(SOURCE, Position::new(2, 1)).is_none());
        assert!(find_definition("MODULE", Position::new(1, 1)).is_none());
    }
}
