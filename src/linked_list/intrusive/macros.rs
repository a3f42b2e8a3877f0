/// Declares an [`Adapter`](crate::linked_list::intrusive::traits::Adapter)
/// for an owner type and one of its links fields.
///
/// ```
/// use static_lists::intrusive_adapter;
/// use static_lists::linked_list::intrusive::prelude::*;
///
/// pub struct Task {
///     id: u32,
///     ready: DoubleListLinks,
///     all: StaticDoubleListLinks,
/// }
///
/// intrusive_adapter!(pub ReadyQueue = Task { ready: DoubleListLinks });
/// intrusive_adapter!(AllTasks = Task { all: StaticDoubleListLinks });
///
/// assert_eq!(<ReadyQueue as Adapter>::OFFSET, core::mem::offset_of!(Task, ready));
/// ```
///
/// The values handed out default to the owner; `=> Value` picks another type
/// with the owner's address and layout, such as a `#[repr(transparent)]`
/// wrapper. A value type of another size or alignment fails to compile.
#[macro_export]
macro_rules! intrusive_adapter {
    ($vis:vis $adapter:ident = $owner:ty { $field:ident : $links:ty }) => {
        $crate::intrusive_adapter!($vis $adapter = $owner { $field: $links } => $owner);
    };
    ($vis:vis $adapter:ident = $owner:ty { $field:ident : $links:ty } => $value:ty) => {
        $vis struct $adapter;

        const _: fn(&$owner) -> &$links = |owner| &owner.$field;
        const _: () = assert!(
            $crate::linked_list::intrusive::traits::same_layout::<$owner, $value>(),
            "adapter value type must have the owner's size and alignment",
        );

        unsafe impl $crate::linked_list::intrusive::traits::Adapter for $adapter {
            type Owner = $owner;
            type Links = $links;
            type Value = $value;

            const OFFSET: usize = ::core::mem::offset_of!($owner, $field);
        }
    };
}
