use alloc::boxed::Box;
use alloc::vec::Vec;

use crate::info::{Type, TypeInfo, TypePath, Typed, impl_type_fn};
use crate::ops::List;
use crate::{FromReflect, Reflect};

/// Information of a list-like type, such as `Vec<T>`.
#[derive(Clone, Debug)]
pub struct ListInfo {
    ty: Type,
    // `TypeInfo` is created on the first visit, the pointer delays it.
    item_info: fn() -> &'static TypeInfo,
    from_items: fn(Vec<Box<dyn Reflect>>) -> Result<Box<dyn Reflect>, Box<dyn Reflect>>,
}

impl ListInfo {
    impl_type_fn!(ty);

    pub fn new<TList, TItem>() -> Self
    where
        TList: List + TypePath + FromIterator<TItem>,
        TItem: FromReflect + Typed,
    {
        Self {
            ty: Type::of::<TList>(),
            item_info: TItem::type_info,
            from_items: |items| {
                let list = items
                    .into_iter()
                    .map(TItem::take_from_reflect)
                    .collect::<Result<TList, _>>()?;
                Ok(Box::new(list))
            },
        }
    }

    #[inline]
    pub fn item_info(&self) -> &'static TypeInfo {
        (self.item_info)()
    }

    /// Builds a list from type-erased items.
    ///
    /// Returns the first item whose type does not match.
    ///
    /// ```
    /// use fp_reflect::Reflect;
    /// use fp_reflect::info::Typed;
    ///
    /// let info = <Vec<u8>>::type_info().as_list().unwrap();
    ///
    /// let list = info.from_items(vec![1_u8.into_boxed_reflect(), 2_u8.into_boxed_reflect()]);
    /// assert_eq!(list.unwrap().take::<Vec<u8>>().unwrap(), vec![1, 2]);
    ///
    /// let bad = info.from_items(vec![1_u8.into_boxed_reflect(), 'x'.into_boxed_reflect()]);
    /// assert!(bad.unwrap_err().is::<char>());
    /// ```
    #[inline]
    pub fn from_items(
        &self,
        items: Vec<Box<dyn Reflect>>,
    ) -> Result<Box<dyn Reflect>, Box<dyn Reflect>> {
        (self.from_items)(items)
    }
}
