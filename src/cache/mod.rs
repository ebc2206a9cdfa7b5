//! 对象缓存抽象层。
//!
//! 缓存后端以插件形式注册（见 [`register`]），运行时按配置选择。
//! 目前内置 moka（进程内）与 redis 两种实现。

pub mod object_cache;
pub mod register;
pub mod traits;

pub use traits::{CacheResult, ObjectCache};

/// 声明并注册一个对象缓存插件。
///
/// 在目标类型所在模块调用，进程启动时通过 `ctor` 自动注册到插件表。
/// 目标类型需要提供 `fn new() -> Result<Self, String>`。
#[macro_export]
macro_rules! declare_object_cache_plugin {
    ($name:expr, $cache_type:ident) => {
        ::paste::paste! {
            #[::ctor::ctor]
            fn [<__register_object_cache_plugin_ $cache_type:snake>]() {
                $crate::cache::register::register_object_cache_plugin(
                    $name,
                    ::std::sync::Arc::new(|| {
                        ::std::boxed::Box::pin(async {
                            let cache = $cache_type::new()
                                .map_err($crate::errors::SchoolSystemError::cache_connection)?;
                            Ok(::std::boxed::Box::new(cache)
                                as ::std::boxed::Box<dyn $crate::cache::ObjectCache>)
                        })
                    }),
                );
            }
        }
    };
}
