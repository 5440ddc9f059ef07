use fp_reflect::info::TypeInfo;
use fp_reflect::registry::TypeTraitDefault;

use super::{DescriptorProvider, FlatAdapter, FlattenError, FlattenResolver};
use crate::context::FlatContext;

/// Creates [`FlatAdapter`]s.
///
/// Applies to struct types only; `Ok(None)` means the type is handled by
/// another codec. The result is not cached, see
/// [`FlatContext::adapter`] for the memoized entry point.
///
/// ```
/// use fp_flat::context::FlatContext;
/// use fp_flat::flatten::FlatAdapterFactory;
/// use fp_reflect::derive::Reflect;
/// use fp_reflect::info::Typed;
///
/// #[derive(Reflect)]
/// struct Part {
///     part_name: String,
/// }
///
/// let ctx = FlatContext::new();
/// let adapter = FlatAdapterFactory::create(Part::type_info(), &ctx).unwrap().unwrap();
/// assert_eq!(adapter.table().len(), 1);
///
/// assert!(FlatAdapterFactory::create(u32::type_info(), &ctx).unwrap().is_none());
/// assert!(FlatAdapterFactory::create(<Option<Part>>::type_info(), &ctx).unwrap().is_none());
/// ```
pub struct FlatAdapterFactory;

impl FlatAdapterFactory {
    pub fn create(
        info: &'static TypeInfo,
        ctx: &FlatContext,
    ) -> Result<Option<FlatAdapter>, FlattenError> {
        let TypeInfo::Struct(struct_info) = info else {
            return Ok(None);
        };

        let provider = DescriptorProvider::new(ctx.naming(), ctx.exclusion());
        let table = FlattenResolver::new(provider, ctx.registry()).build(struct_info)?;
        let constructor = ctx
            .registry()
            .get_type_trait::<TypeTraitDefault>(info.ty_id())
            .cloned();

        Ok(Some(FlatAdapter::new(struct_info, table, constructor)))
    }
}
