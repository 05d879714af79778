//! The type, aggregate, and symbol tables.

use crate::aggregate::{AggregateData, AggregateId, AggregateKind};
use crate::delegation::DelegationList;
use crate::quals::Qualifiers;
use crate::symbols::{MethodSig, SymbolData, SymbolId, SymbolKind};
use crate::types::{TypeData, TypeId, TypeKind};
use rustc_hash::FxHashMap;
use smallvec::SmallVec;
use veld_common::{Atom, Interner};

/// Interning storage for types plus the aggregate and member symbol tables.
///
/// Interning makes `TypeId` equality structural equality, so the `TypeId`
/// itself doubles as the canonical identity of a type; the string identity
/// key produced at intern time is kept for logging and diagnostics.
pub struct TypeTable {
    types: Vec<TypeData>,
    keys: Vec<String>,
    lookup: FxHashMap<TypeData, TypeId>,
    aggregates: Vec<AggregateData>,
    symbols: Vec<SymbolData>,
    names: Interner,
}

impl Default for TypeTable {
    fn default() -> Self {
        Self::new()
    }
}

impl TypeTable {
    pub fn new() -> Self {
        let mut table = Self {
            types: Vec::new(),
            keys: Vec::new(),
            lookup: FxHashMap::default(),
            aggregates: Vec::new(),
            symbols: Vec::new(),
            names: Interner::new(),
        };
        // Slot 0 is the error sentinel.
        let error = table.intern(TypeKind::Error, Qualifiers::empty());
        debug_assert_eq!(error, TypeId::ERROR);
        table
    }

    // -----------------------------------------------------------------------
    // Types
    // -----------------------------------------------------------------------

    /// Intern a type, returning the existing id for a structurally equal one.
    pub fn intern(&mut self, kind: TypeKind, quals: Qualifiers) -> TypeId {
        let data = TypeData { kind, quals };
        if let Some(&id) = self.lookup.get(&data) {
            return id;
        }
        let id = TypeId(self.types.len() as u32);
        let key = self.build_key(kind, quals);
        self.types.push(data);
        self.keys.push(key);
        self.lookup.insert(data, id);
        id
    }

    fn build_key(&self, kind: TypeKind, quals: Qualifiers) -> String {
        let base = match kind {
            TypeKind::Aggregate(agg) => {
                let data = &self.aggregates[agg.index()];
                let name = self.names.resolve(data.name);
                let tag = match data.kind {
                    AggregateKind::Value => 'S',
                    AggregateKind::Reference => 'C',
                };
                format!("{tag}{}{name}", name.len())
            }
            other => other.key_code().to_string(),
        };
        let mut key = String::new();
        if quals.contains(Qualifiers::CONST) {
            key.push('x');
        }
        if quals.contains(Qualifiers::WILD) {
            key.push('w');
        }
        key.push_str(&base);
        key
    }

    pub fn type_data(&self, ty: TypeId) -> TypeData {
        self.types[ty.index()]
    }

    pub fn kind(&self, ty: TypeId) -> TypeKind {
        self.types[ty.index()].kind
    }

    pub fn quals(&self, ty: TypeId) -> Qualifiers {
        self.types[ty.index()].quals
    }

    /// The stable string signature of a type.
    pub fn identity_key(&self, ty: TypeId) -> &str {
        &self.keys[ty.index()]
    }

    /// Human-readable type name for diagnostics.
    pub fn display_type(&self, ty: TypeId) -> String {
        let data = self.types[ty.index()];
        let base = match data.kind {
            TypeKind::Error => "<error>".to_string(),
            TypeKind::Bool => "bool".to_string(),
            TypeKind::Int32 => "int32".to_string(),
            TypeKind::Int64 => "int64".to_string(),
            TypeKind::Float64 => "float64".to_string(),
            TypeKind::Str => "str".to_string(),
            TypeKind::Aggregate(agg) => self.aggregate_name(agg).to_string(),
        };
        if data.quals.is_empty() {
            base
        } else {
            format!("{} {base}", data.quals.describe())
        }
    }

    /// Re-intern `ty` with exactly `quals`.
    pub fn with_quals(&mut self, ty: TypeId, quals: Qualifiers) -> TypeId {
        if ty.is_error() {
            return ty;
        }
        let kind = self.kind(ty);
        self.intern(kind, quals)
    }

    /// Re-intern `ty` with its qualifiers widened by `quals`.
    pub fn add_quals(&mut self, ty: TypeId, quals: Qualifiers) -> TypeId {
        if ty.is_error() || quals.is_empty() {
            return ty;
        }
        let merged = self.quals(ty) | quals;
        self.with_quals(ty, merged)
    }

    /// Substitute a wild qualifier with the qualifiers of the source the
    /// type was reached through. Non-wild types are unchanged.
    pub fn subst_wild(&mut self, ty: TypeId, source: Qualifiers) -> TypeId {
        if ty.is_error() {
            return ty;
        }
        let quals = self.quals(ty);
        if !quals.contains(Qualifiers::WILD) {
            return ty;
        }
        // A wild source stays wild: the substituted type keeps deferring to
        // whatever qualifiers the outer caller supplies.
        let substituted = (quals - Qualifiers::WILD) | source;
        self.with_quals(ty, substituted)
    }

    /// The aggregate underlying `ty`, if it is an aggregate type.
    pub fn aggregate_of(&self, ty: TypeId) -> Option<AggregateId> {
        match self.kind(ty) {
            TypeKind::Aggregate(agg) => Some(agg),
            _ => None,
        }
    }

    pub fn intern_name(&mut self, name: &str) -> Atom {
        self.names.intern(name)
    }

    pub fn resolve_name(&self, name: Atom) -> &str {
        self.names.resolve(name)
    }

    // -----------------------------------------------------------------------
    // Aggregates
    // -----------------------------------------------------------------------

    pub fn new_aggregate(&mut self, name: &str, kind: AggregateKind) -> AggregateId {
        let name = self.names.intern(name);
        let id = AggregateId(self.aggregates.len() as u32);
        self.aggregates.push(AggregateData {
            name,
            kind,
            bases: Vec::new(),
            members: Vec::new(),
            delegation: DelegationList::new(),
            canonical: None,
        });
        id
    }

    pub fn aggregate(&self, agg: AggregateId) -> &AggregateData {
        &self.aggregates[agg.index()]
    }

    pub fn aggregate_name(&self, agg: AggregateId) -> &str {
        self.names.resolve(self.aggregates[agg.index()].name)
    }

    /// The unqualified type of an aggregate.
    pub fn aggregate_type(&mut self, agg: AggregateId) -> TypeId {
        self.intern(TypeKind::Aggregate(agg), Qualifiers::empty())
    }

    pub fn add_base(&mut self, agg: AggregateId, base: TypeId) {
        debug_assert_eq!(
            self.aggregates[agg.index()].kind,
            AggregateKind::Reference,
            "only reference aggregates declare base types"
        );
        self.aggregates[agg.index()].bases.push(base);
    }

    /// Mark `agg` as an error-recovery alias of `canonical`; the two share
    /// one delegation list from now on.
    pub fn set_canonical(&mut self, agg: AggregateId, canonical: AggregateId) {
        debug_assert_ne!(agg, canonical);
        self.aggregates[agg.index()].canonical = Some(canonical);
    }

    /// Resolve the error-recovery alias link, if any.
    pub fn canonical_aggregate(&self, agg: AggregateId) -> AggregateId {
        self.aggregates[agg.index()].canonical.unwrap_or(agg)
    }

    pub fn delegation(&self, agg: AggregateId) -> &DelegationList {
        let canonical = self.canonical_aggregate(agg);
        &self.aggregates[canonical.index()].delegation
    }

    pub fn delegation_mut(&mut self, agg: AggregateId) -> &mut DelegationList {
        let canonical = self.canonical_aggregate(agg);
        &mut self.aggregates[canonical.index()].delegation
    }

    // -----------------------------------------------------------------------
    // Member symbols
    // -----------------------------------------------------------------------

    fn add_symbol(&mut self, agg: Option<AggregateId>, name: &str, kind: SymbolKind) -> SymbolId {
        let name = self.names.intern(name);
        let id = SymbolId(self.symbols.len() as u32);
        self.symbols.push(SymbolData { name, kind });
        if let Some(agg) = agg {
            self.aggregates[agg.index()].members.push(id);
        }
        id
    }

    pub fn add_field(&mut self, agg: AggregateId, name: &str, ty: TypeId) -> SymbolId {
        self.add_symbol(Some(agg), name, SymbolKind::Field { ty })
    }

    pub fn add_method(
        &mut self,
        agg: AggregateId,
        name: &str,
        overloads: impl IntoIterator<Item = MethodSig>,
    ) -> SymbolId {
        let overloads: SmallVec<[MethodSig; 2]> = overloads.into_iter().collect();
        self.add_symbol(Some(agg), name, SymbolKind::Method { overloads })
    }

    pub fn add_template_method(
        &mut self,
        agg: AggregateId,
        name: &str,
        instance: Option<Vec<MethodSig>>,
    ) -> SymbolId {
        let instance = instance.map(|sigs| sigs.into_iter().collect());
        self.add_symbol(Some(agg), name, SymbolKind::TemplateMethod { instance })
    }

    pub fn add_enum_const(&mut self, agg: AggregateId, name: &str, ty: TypeId) -> SymbolId {
        self.add_symbol(Some(agg), name, SymbolKind::EnumConst { ty })
    }

    /// Declare a tuple member; `elements` become free-standing field symbols
    /// referenced by the tuple.
    pub fn add_tuple<'a>(
        &mut self,
        agg: AggregateId,
        name: &str,
        elements: impl IntoIterator<Item = (&'a str, TypeId)>,
    ) -> SymbolId {
        let elements: Vec<SymbolId> = elements
            .into_iter()
            .map(|(elem_name, ty)| self.add_symbol(None, elem_name, SymbolKind::Field { ty }))
            .collect();
        self.add_symbol(Some(agg), name, SymbolKind::Tuple { elements })
    }

    pub fn symbol(&self, sym: SymbolId) -> &SymbolData {
        &self.symbols[sym.index()]
    }

    pub fn symbol_name(&self, sym: SymbolId) -> &str {
        self.names.resolve(self.symbols[sym.index()].name)
    }

    /// Look up a member of `agg` by name. Does not search base types; base
    /// members are reached through the conversion search, not through
    /// delegate registration.
    pub fn find_member(&self, agg: AggregateId, name: &str) -> Option<SymbolId> {
        let atom = self.names.get(name)?;
        self.aggregates[agg.index()]
            .members
            .iter()
            .copied()
            .find(|&sym| self.symbols[sym.index()].name == atom)
    }

    /// Whether any declaration anywhere uses `name`. Distinguishes
    /// "exists elsewhere but not here" from "does not exist at all" in
    /// registration diagnostics.
    pub fn any_symbol_named(&self, name: &str) -> bool {
        let Some(atom) = self.names.get(name) else {
            return false;
        };
        self.symbols.iter().any(|sym| sym.name == atom)
    }
}
