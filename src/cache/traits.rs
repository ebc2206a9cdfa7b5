use async_trait::async_trait;

/// 缓存读取结果。
///
/// `ExistsButNoValue` 表示后端出错或值不可用，调用方应当回源而不是
/// 把它当作确定的未命中。
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CacheResult<T> {
    Found(T),
    NotFound,
    ExistsButNoValue,
}

/// 字符串键值缓存后端。
///
/// 值统一以 JSON 字符串存取，序列化由调用方负责，
/// 这样 trait 对象可以直接放进 `Arc<dyn ObjectCache>`。
#[async_trait]
pub trait ObjectCache: Send + Sync {
    async fn get_raw(&self, key: &str) -> CacheResult<String>;

    /// ttl 单位为秒，0 表示使用后端默认 TTL
    async fn insert_raw(&self, key: String, value: String, ttl: u64);

    async fn remove(&self, key: &str);

    async fn invalidate_all(&self);
}
