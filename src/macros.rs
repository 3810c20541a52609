/// Implements `Copy`, `Clone`, `Default`, `PartialEq` and `Debug` for a `#[repr(C)]`
/// struct whose fields all share the type parameter, as well as zero-copy slice views
/// when the `unsafe` feature is enabled.
#[macro_export]
macro_rules! impl_standard_traits {
    ($type_name:ident, $type_param:ident, $first:ident $(, $field:ident)*) => {
        impl<$type_param> Copy for $type_name<$type_param> where $type_param: Copy {}

        impl<$type_param> Clone for $type_name<$type_param>
        where
            $type_param: Clone,
        {
            #[inline]
            fn clone(&self) -> Self {
                Self {
                    $first: self.$first.clone(),
                    $($field: self.$field.clone()),*
                }
            }
        }

        impl<$type_param> Default for $type_name<$type_param>
        where
            $type_param: Default,
        {
            #[inline]
            fn default() -> Self {
                Self {
                    $first: Default::default(),
                    $($field: Default::default()),*
                }
            }
        }

        impl<$type_param> PartialEq for $type_name<$type_param>
        where
            $type_param: PartialEq,
        {
            #[inline]
            fn eq(&self, other: &Self) -> bool {
                self.$first == other.$first $(&& self.$field == other.$field)*
            }
        }

        impl<$type_param> core::fmt::Debug for $type_name<$type_param>
        where
            $type_param: core::fmt::Debug,
        {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                f.debug_struct(stringify!($type_name))
                    .field(stringify!($first), &self.$first)
                    $(.field(stringify!($field), &self.$field))*
                    .finish()
            }
        }

        #[cfg_attr(docsrs, doc(cfg(feature = "unsafe")))]
        #[cfg(feature = "unsafe")]
        impl<$type_param> $type_name<$type_param> {
            /// The number of scalar fields in this type.
            const FIELDS: usize =
                core::mem::size_of::<Self>() / core::mem::size_of::<$type_param>();

            /// Reinterprets a slice of scalars as an instance of this type.
            ///
            /// ## Panics
            /// Panics if the slice length does not match the number of fields.
            #[allow(unused)]
            #[inline]
            pub fn from_slice(slice: &[$type_param]) -> &Self {
                assert_eq!(slice.len(), Self::FIELDS);

                // SAFETY: $type_name only contains `$type_param` fields and is `repr(C)`
                unsafe { &*(slice.as_ptr() as *const Self) }
            }

            /// Reinterprets a mutable slice of scalars as an instance of this type.
            ///
            /// ## Panics
            /// Panics if the slice length does not match the number of fields.
            #[allow(unused)]
            #[inline]
            pub fn from_mut_slice(slice: &mut [$type_param]) -> &mut Self {
                assert_eq!(slice.len(), Self::FIELDS);

                // SAFETY: $type_name only contains `$type_param` fields and is `repr(C)`
                unsafe { &mut *(slice.as_mut_ptr() as *mut Self) }
            }

            /// Views this instance as a slice of scalars.
            #[allow(unused)]
            #[inline]
            pub fn as_slice(&self) -> &[$type_param] {
                // SAFETY: $type_name only contains `$type_param` fields and is `repr(C)`
                unsafe { core::slice::from_raw_parts(self as *const _ as *const $type_param, Self::FIELDS) }
            }
        }

        #[cfg(test)]
        paste::paste! {
            #[cfg(test)]
            mod [<tests_gen_ $type_name:snake>] {
                use super::*;

                #[test]
                fn test_default_equals_clone() {
                    let value = $type_name::<f64>::default();
                    assert_eq!(value.clone(), value);
                }

                #[test]
                #[cfg(feature = "unsafe")]
                fn test_from_slice() {
                    const NUM_ELEMS: usize =
                        core::mem::size_of::<$type_name<u32>>() / core::mem::size_of::<u32>();
                    let data = [0u32; NUM_ELEMS + 1];
                    let value = $type_name::from_slice(&data[..NUM_ELEMS]);
                    assert!(core::ptr::eq(value.as_slice().as_ptr(), data.as_ptr()));
                }

                #[test]
                #[cfg(feature = "unsafe")]
                fn test_from_mut_slice() {
                    const NUM_ELEMS: usize =
                        core::mem::size_of::<$type_name<u32>>() / core::mem::size_of::<u32>();
                    let mut data = [0u32; NUM_ELEMS];
                    {
                        let value = $type_name::from_mut_slice(&mut data[..]);
                        value.$first = 10;
                    }
                    assert_eq!(data[0], 10, "expect data to be changed");
                }
            }
        }
    };
}
