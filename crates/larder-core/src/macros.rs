/// Declares a flat struct and implements [`Record`](crate::Record) for it.
///
/// Field types must convert to and from [`Value`](crate::Value), which
/// restricts them to the supported scalars; anything else fails to compile
/// rather than producing wrong SQL. A `#[column = "..."]` annotation on a
/// field overrides the derived (lower-cased) column name.
///
/// ```
/// larder_core::record! {
///     #[derive(Debug, Default, Clone, PartialEq)]
///     pub struct Measurement {
///         id: i32,
///         #[column = "reading"]
///         value: f64,
///     }
/// }
/// ```
#[macro_export]
macro_rules! record {
    (
        $(#[$meta:meta])*
        $vis:vis struct $name:ident {
            $(
                $(#[column = $column:literal])?
                $fvis:vis $field:ident : $ty:ty
            ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        $vis struct $name {
            $( $fvis $field: $ty, )+
        }

        impl $crate::Record for $name {
            const FIELDS: &'static [$crate::FieldDescriptor] = &[
                $( $crate::record!(@descriptor $field $(, $column)?), )+
            ];

            fn values(&self) -> ::std::vec::Vec<$crate::Value> {
                ::std::vec![
                    $( $crate::Value::from(self.$field.clone()), )+
                ]
            }

            fn load(&mut self, row: ::std::vec::Vec<$crate::Value>) -> $crate::Result<()> {
                let mut cells = row.into_iter();
                $(
                    self.$field = $crate::FromValue::from_value(
                        cells
                            .next()
                            .expect("row width does not match record shape"),
                    )?;
                )+
                ::std::result::Result::Ok(())
            }
        }
    };

    (@descriptor $field:ident) => {
        $crate::FieldDescriptor::new(stringify!($field))
    };

    (@descriptor $field:ident, $column:literal) => {
        $crate::FieldDescriptor::with_column(stringify!($field), $column)
    };
}
