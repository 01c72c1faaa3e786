//! Leaf injectedness decision table
//!
//! Pure symbol-shape classification, no tree walking: can this symbol's
//! value have been supplied from outside the analyzed type? The table is
//! the single source of truth; everything above it composes the table with
//! resolved value roots.

use crate::errors::{Result, TraceError};
use crate::shared::models::{Symbol, SymbolKind, Verdict};

/// Is this symbol an externally-supplied value.
///
/// * parameters are injected by definition,
/// * locals are pass-through (re-resolve their assignments),
/// * static members are reachable from anywhere, so treated as injected,
/// * a readonly field or get-only property can only be set inside the
///   declaring type,
/// * a mutable member is settable from outside exactly when it (or its
///   setter) is non-private.
///
/// Classifying a method symbol is a caller bug: the table has no row for
/// it, and silently guessing would hide the missing case.
pub fn injectedness(symbol: &Symbol) -> Result<Verdict> {
    match symbol.kind {
        SymbolKind::Parameter => Ok(Verdict::Yes),
        SymbolKind::Local => Ok(Verdict::Unknown),
        SymbolKind::Field => {
            if symbol.is_static {
                Ok(Verdict::Yes)
            } else if symbol.is_readonly {
                Ok(Verdict::No)
            } else if symbol.accessibility.is_private() {
                Ok(Verdict::No)
            } else {
                Ok(Verdict::Maybe)
            }
        }
        SymbolKind::Property => {
            if symbol.is_static {
                return Ok(Verdict::Yes);
            }
            match symbol.setter_accessibility {
                None => Ok(Verdict::No),
                Some(setter) if setter.is_private() => Ok(Verdict::No),
                Some(_) => Ok(Verdict::Maybe),
            }
        }
        SymbolKind::Method => Err(TraceError::UnsupportedSymbol(symbol.name.clone())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::semantic::SemanticBuilder;
    use crate::shared::models::Accessibility;

    fn symbol_of(builder: SemanticBuilder, id: crate::shared::models::SymbolId) -> Symbol {
        builder.finish().symbol(id).clone()
    }

    #[test]
    fn test_parameter_is_injected() {
        let mut builder = SemanticBuilder::new();
        let ty = builder.class("C");
        let (ctor, _block) = builder.constructor(ty);
        let param = builder.parameter(ctor, "dep");
        assert_eq!(
            injectedness(&symbol_of(builder, param)),
            Ok(Verdict::Yes)
        );
    }

    #[test]
    fn test_local_is_pass_through() {
        let mut builder = SemanticBuilder::new();
        let ty = builder.class("C");
        let (_method, block) = builder.method(ty, "Run", Accessibility::Public, false);
        let local = builder.local(block, "x", None);
        assert_eq!(
            injectedness(&symbol_of(builder, local)),
            Ok(Verdict::Unknown)
        );
    }

    #[test]
    fn test_field_table_rows() {
        let mut builder = SemanticBuilder::new();
        let ty = builder.class("C");
        let stat = builder.field(ty, "a", Accessibility::Private, true, false);
        let ro = builder.field(ty, "b", Accessibility::Public, false, true);
        let pub_mut = builder.field(ty, "c", Accessibility::Public, false, false);
        let priv_mut = builder.field(ty, "d", Accessibility::Private, false, false);
        let model = builder.finish();

        assert_eq!(injectedness(model.symbol(stat)), Ok(Verdict::Yes));
        assert_eq!(injectedness(model.symbol(ro)), Ok(Verdict::No));
        assert_eq!(injectedness(model.symbol(pub_mut)), Ok(Verdict::Maybe));
        assert_eq!(injectedness(model.symbol(priv_mut)), Ok(Verdict::No));
    }

    #[test]
    fn test_property_table_rows() {
        let mut builder = SemanticBuilder::new();
        let ty = builder.class("C");
        let get_only = builder.auto_property(ty, "A", Accessibility::Public, None);
        let pub_set =
            builder.auto_property(ty, "B", Accessibility::Public, Some(Accessibility::Public));
        let priv_set =
            builder.auto_property(ty, "D", Accessibility::Public, Some(Accessibility::Private));
        let model = builder.finish();

        assert_eq!(injectedness(model.symbol(get_only)), Ok(Verdict::No));
        assert_eq!(injectedness(model.symbol(pub_set)), Ok(Verdict::Maybe));
        assert_eq!(injectedness(model.symbol(priv_set)), Ok(Verdict::No));
    }

    #[test]
    fn test_method_symbol_is_rejected() {
        let mut builder = SemanticBuilder::new();
        let ty = builder.class("C");
        let (method, _block) = builder.method(ty, "Run", Accessibility::Public, false);
        let model = builder.finish();

        assert!(matches!(
            injectedness(model.symbol(method)),
            Err(TraceError::UnsupportedSymbol(_))
        ));
    }
}
