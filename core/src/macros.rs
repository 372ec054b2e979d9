/// Matches on the storage variant of an [`AnyImg`](crate::img::AnyImg) or
/// [`AnyAccess`](crate::img::AnyAccess), binding the inner value to the same
/// name in every arm.
///
/// # Examples
///
/// ```
/// # use ndimg_core::img::AnyImg;
/// # use ndimg_core::match_storage;
/// # use ndimg_core::prelude::*;
/// fn element_count(img: &AnyImg<u8>) -> i64 {
///     match_storage!(AnyImg, img, inner => inner.size())
/// }
///
/// let img = ImgFactory::new(StorageKind::Planar).create::<u8>(&[4, 5, 2]).unwrap();
/// assert_eq!(40, element_count(&img));
/// ```
#[macro_export]
macro_rules! match_storage {
    ($enum:ident, $value:expr, $inner:ident => $result:expr $(,)?) => {
        match $value {
            $enum::Array($inner) => $result,
            $enum::Cell($inner) => $result,
            $enum::Planar($inner) => $result,
            $enum::Ntree($inner) => $result,
        }
    };
}
