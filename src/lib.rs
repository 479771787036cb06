//! QuizRoom - 课堂测验服务后端
//!
//! 基于 Actix Web 构建。教师维护题库、班级并发起限时测验会话，
//! 学生加入会话后随机作答并立即看到结果。
//!
//! # 架构
//! - `cache`: 缓存层（Moka/Redis），同时保存作答轮次与一次性令牌
//! - `config`: 配置管理
//! - `entity`: SeaORM 数据库实体
//! - `errors`: 统一错误处理
//! - `identity`: 教师/学生角色解析
//! - `middlewares`: 认证、角色与限流中间件
//! - `models`: 数据模型定义
//! - `object_storage`: 题目图片的对象存储
//! - `routes`: API 路由层
//! - `runtime`: 运行时生命周期管理
//! - `services`: 业务逻辑层
//! - `storage`: 数据存储层（SeaORM）
//! - `utils`: 工具函数

pub mod cache;
pub mod config;
pub mod entity;
pub mod errors;
pub mod identity;
pub mod middlewares;
pub mod models;
pub mod object_storage;
pub mod routes;
pub mod runtime;
pub mod services;
pub mod storage;
pub mod utils;
