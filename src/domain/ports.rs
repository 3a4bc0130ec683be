use crate::domain::model::{GroupingResult, Member, ProjectSpec, RemainderPolicy, RosterSource};
use crate::utils::error::Result;
use async_trait::async_trait;

pub trait Storage: Send + Sync {
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}

pub trait ConfigProvider: Send + Sync {
    fn roster_source(&self) -> RosterSource;
    fn projects(&self) -> Vec<ProjectSpec>;
    fn remainder_policy(&self) -> RemainderPolicy;
    /// 固定亂數種子；`None` 代表使用系統亂數
    fn seed(&self) -> Option<u64>;
    fn output_path(&self) -> &str;
    fn output_formats(&self) -> &[String];
    fn archive(&self) -> bool;
}

#[async_trait]
pub trait Pipeline: Send + Sync {
    async fn extract(&self) -> Result<Vec<Member>>;
    async fn transform(&self, roster: Vec<Member>) -> Result<GroupingResult>;
    async fn load(&self, result: GroupingResult) -> Result<String>;
}
