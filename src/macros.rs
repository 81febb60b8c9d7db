//! Declarative generators for XDR composite types
//!
//! Every enum, struct and union in [`crate::xdr`] is declared through one of
//! these macros so that the wire layout is read straight off the declaration:
//! fields are packed in declaration order and union arms carry their
//! discriminant next to the payload type.

/// Declares a plain XDR enum, encoded as a signed 32-bit discriminant.
macro_rules! xdr_enum {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $( $(#[$vmeta:meta])* $variant:ident = $value:expr ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        #[repr(i32)]
        $vis enum $name {
            $( $(#[$vmeta])* $variant = $value ),+
        }

        impl $name {
            pub const VARIANTS: &'static [$name] = &[$($name::$variant),+];

            pub fn from_i32(value: i32) -> Option<Self> {
                match value {
                    $( v if v == $value => Some($name::$variant), )+
                    _ => None,
                }
            }

            pub fn value(self) -> i32 {
                self as i32
            }
        }

        impl $crate::serialization::XdrEncode for $name {
            fn encode_xdr(&self, writer: &mut Vec<u8>) -> $crate::error::Result<()> {
                $crate::serialization::encode_i32(*self as i32, writer)
            }
        }

        impl $crate::serialization::XdrDecode for $name {
            fn decode_xdr(cursor: &mut std::io::Cursor<&[u8]>) -> $crate::error::Result<Self> {
                let value = $crate::serialization::decode_i32(cursor)
                    .map_err(|e| e.within(stringify!($name)))?;
                Self::from_i32(value).ok_or($crate::error::TxAsmError::UnknownDiscriminant {
                    type_name: stringify!($name),
                    value,
                })
            }
        }
    };
}

/// Declares an XDR struct. Fields are encoded in the order they are written.
macro_rules! xdr_struct {
    (
        $(#[$meta:meta])*
        $vis:vis struct $name:ident {
            $( $(#[$fmeta:meta])* $fvis:vis $field:ident : $ty:ty ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq)]
        $vis struct $name {
            $( $(#[$fmeta])* $fvis $field: $ty ),+
        }

        impl $crate::serialization::XdrEncode for $name {
            fn encode_xdr(&self, writer: &mut Vec<u8>) -> $crate::error::Result<()> {
                $( $crate::serialization::XdrEncode::encode_xdr(&self.$field, writer)?; )+
                Ok(())
            }
        }

        impl $crate::serialization::XdrDecode for $name {
            fn decode_xdr(cursor: &mut std::io::Cursor<&[u8]>) -> $crate::error::Result<Self> {
                Ok($name {
                    $(
                        $field: <$ty as $crate::serialization::XdrDecode>::decode_xdr(cursor)
                            .map_err(|e| e.within(stringify!($name)))?,
                    )+
                })
            }
        }
    };
}

/// Declares a discriminated XDR union as a Rust enum-with-data.
///
/// Arms without a payload are written `Variant = discriminant`, arms with one
/// `Variant(Type) = discriminant`.
macro_rules! xdr_union {
    (@pattern $name:ident, $variant:ident, $bind:ident) => {
        $name::$variant
    };
    (@pattern $name:ident, $variant:ident, $bind:ident, $ty:ty) => {
        $name::$variant($bind)
    };
    (@encode $bind:ident, $writer:ident) => {
        Ok(())
    };
    (@encode $bind:ident, $writer:ident, $ty:ty) => {
        $crate::serialization::XdrEncode::encode_xdr($bind, $writer)
    };
    (@decode $name:ident, $variant:ident, $cursor:ident) => {
        $name::$variant
    };
    (@decode $name:ident, $variant:ident, $cursor:ident, $ty:ty) => {
        $name::$variant(
            <$ty as $crate::serialization::XdrDecode>::decode_xdr($cursor)
                .map_err(|e| e.within(stringify!($name)))?,
        )
    };
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $( $(#[$vmeta:meta])* $variant:ident $( ( $ty:ty ) )? = $disc:expr ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq)]
        $vis enum $name {
            $( $(#[$vmeta])* $variant $( ( $ty ) )? ),+
        }

        impl $name {
            /// The wire discriminant of the active arm.
            pub fn discriminant(&self) -> i32 {
                match self {
                    $( xdr_union!(@pattern $name, $variant, _payload $(, $ty)?) => $disc, )+
                }
            }
        }

        impl $crate::serialization::XdrEncode for $name {
            fn encode_xdr(&self, writer: &mut Vec<u8>) -> $crate::error::Result<()> {
                $crate::serialization::encode_i32(self.discriminant(), writer)?;
                match self {
                    $(
                        xdr_union!(@pattern $name, $variant, payload $(, $ty)?) =>
                            xdr_union!(@encode payload, writer $(, $ty)?),
                    )+
                }
            }
        }

        impl $crate::serialization::XdrDecode for $name {
            fn decode_xdr(cursor: &mut std::io::Cursor<&[u8]>) -> $crate::error::Result<Self> {
                let discriminant = $crate::serialization::decode_i32(cursor)
                    .map_err(|e| e.within(stringify!($name)))?;
                let decoded = match discriminant {
                    $( d if d == $disc => xdr_union!(@decode $name, $variant, cursor $(, $ty)?), )+
                    value => {
                        return Err($crate::error::TxAsmError::UnknownDiscriminant {
                            type_name: stringify!($name),
                            value,
                        })
                    }
                };
                Ok(decoded)
            }
        }
    };
}
