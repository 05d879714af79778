//! Type qualifiers and receiver qualifiers.

use bitflags::bitflags;

bitflags! {
    /// Qualifiers attached to a type.
    ///
    /// `WILD` is the "adopt the caller's qualifiers" qualifier: a wild method
    /// return takes on the qualifiers of the receiver it was invoked through.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct Qualifiers: u8 {
        const CONST = 1 << 0;
        const WILD = 1 << 1;
    }
}

impl Qualifiers {
    /// Short display form used in identity keys and diagnostics.
    pub fn describe(self) -> &'static str {
        match (self.contains(Self::CONST), self.contains(Self::WILD)) {
            (false, false) => "mutable",
            (true, false) => "const",
            (false, true) => "wild",
            (true, true) => "const wild",
        }
    }
}

/// The implicit-receiver qualifier of a method overload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReceiverQual {
    /// Requires an unqualified receiver.
    Mutable,
    /// Accepts any receiver.
    Const,
    /// Accepts any receiver, substituting its qualifiers into the return type.
    Wild,
}

impl ReceiverQual {
    /// Whether an overload with this receiver can be invoked through a
    /// receiver carrying `source` qualifiers.
    pub fn accepts(self, source: Qualifiers) -> bool {
        match self {
            ReceiverQual::Mutable => !source.contains(Qualifiers::CONST),
            ReceiverQual::Const | ReceiverQual::Wild => true,
        }
    }

    /// Whether this overload is an exact qualifier match for `source`,
    /// as opposed to merely accepting it.
    pub fn is_exact_for(self, source: Qualifiers) -> bool {
        match self {
            ReceiverQual::Mutable => source.is_empty(),
            ReceiverQual::Const => source.contains(Qualifiers::CONST),
            ReceiverQual::Wild => source.contains(Qualifiers::WILD),
        }
    }
}
