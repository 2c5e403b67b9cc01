//! Flattened result-type slots of a function signature.

use tree_sitter::Node;

use crate::syntax::{self, kind};

/// Positional result types of one function, one slot per returned value.
///
/// `func f() (a, b Color, err error)` flattens to `[Color, Color, error]`.
/// A slot holds the bare type name, or `None` when the result type is not
/// a plain named type.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FunctionSignature<'src> {
    slots: Vec<Option<&'src str>>,
}

impl<'src> FunctionSignature<'src> {
    /// Read the `result` part of a function declaration, method or literal.
    pub fn of(function: Node<'_>, source: &'src str) -> Self {
        let Some(result) = function.child_by_field_name("result") else {
            return Self::default();
        };

        if result.kind() != kind::PARAMETER_LIST {
            return Self {
                slots: vec![syntax::named_type(Some(result), source)],
            };
        }

        let mut slots = Vec::new();
        for group in syntax::list_items(result) {
            let type_name = syntax::named_type(group.child_by_field_name("type"), source);
            let names = syntax::field_nodes(group, "name").len();
            slots.extend(std::iter::repeat(type_name).take(names.max(1)));
        }
        Self { slots }
    }

    pub fn slots(&self) -> &[Option<&'src str>] {
        &self.slots
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse::Unit;

    fn signature_of(src: &str) -> Vec<Option<String>> {
        let unit = Unit::from_sources([("s.go", src)]).unwrap();
        let file = &unit.files()[0];
        let func = syntax::descendants(file.root())
            .find(|n| syntax::is_function_like(*n))
            .expect("function");
        FunctionSignature::of(func, file.source())
            .slots()
            .iter()
            .map(|s| s.map(str::to_string))
            .collect()
    }

    #[test]
    fn test_no_results() {
        assert!(signature_of("package p\nfunc f() {}\n").is_empty());
    }

    #[test]
    fn test_single_unparenthesized_result() {
        assert_eq!(
            signature_of("package p\nfunc f() Status { return StatusA }\n"),
            vec![Some("Status".to_string())]
        );
    }

    #[test]
    fn test_unnamed_result_list() {
        assert_eq!(
            signature_of("package p\nfunc f() (Color, *Evidence, error) { return }\n"),
            vec![Some("Color".to_string()), None, Some("error".to_string())]
        );
    }

    #[test]
    fn test_named_group_contributes_one_slot_per_name() {
        assert_eq!(
            signature_of("package p\nfunc f() (a, b Color, n int) { return }\n"),
            vec![
                Some("Color".to_string()),
                Some("Color".to_string()),
                Some("int".to_string())
            ]
        );
    }

    #[test]
    fn test_qualified_result_is_not_named() {
        assert_eq!(
            signature_of("package p\nfunc f() ext.Kind { return ext.KindA }\n"),
            vec![None]
        );
    }

    #[test]
    fn test_method_and_literal_results() {
        assert_eq!(
            signature_of("package p\nfunc (s *Svc) Mode() Mode { return ModeA }\n"),
            vec![Some("Mode".to_string())]
        );
        assert_eq!(
            signature_of("package p\nvar f = func() Flag { return FlagOn }\n"),
            vec![Some("Flag".to_string())]
        );
    }
}
