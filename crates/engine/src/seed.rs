//! Sample data the client starts with when no other source is configured.

use crate::{Money, OccurredDate, Tag, Transaction, TransactionId, TransactionKind};

pub fn mock_transactions() -> Vec<Transaction> {
    vec![
        Transaction {
            id: TransactionId::from("t1"),
            kind: TransactionKind::Expense,
            amount: Money::new(42_50),
            note: "和团队在那家新的意大利餐厅吃了个快餐。".to_string(),
            tags: vec!["美食".to_string(), "团队".to_string()],
            occurred_date: OccurredDate::new("2025年8月20日"),
            occurred_time: "上午 10:45".to_string(),
            location: Some("市中心".to_string()),
            payment_method: Some("维萨卡 *4242".to_string()),
        },
        Transaction {
            id: TransactionId::from("t2"),
            kind: TransactionKind::Income,
            amount: Money::new(2_800_00),
            note: "每月工资入账。".to_string(),
            tags: vec!["工作".to_string(), "收入".to_string()],
            occurred_date: OccurredDate::new("2025年8月20日"),
            occurred_time: "上午 09:00".to_string(),
            location: None,
            payment_method: None,
        },
        Transaction {
            id: TransactionId::from("t3"),
            kind: TransactionKind::Note,
            amount: Money::ZERO,
            note: "记得明天检查云存储的订阅情况，或许可以降级套餐。".to_string(),
            tags: vec!["提醒".to_string(), "储蓄".to_string()],
            occurred_date: OccurredDate::new("2025年8月20日"),
            occurred_time: "上午 08:15".to_string(),
            location: None,
            payment_method: None,
        },
        Transaction {
            id: TransactionId::from("t4"),
            kind: TransactionKind::Expense,
            amount: Money::new(15_99),
            note: "数字流媒体服务月度续费。".to_string(),
            tags: vec!["娱乐".to_string()],
            occurred_date: OccurredDate::new("2025年8月19日"),
            occurred_time: "下午 06:30".to_string(),
            location: None,
            payment_method: None,
        },
    ]
}

pub fn initial_tags() -> Vec<Tag> {
    [
        ("1", "美食", 24),
        ("2", "团队", 12),
        ("3", "工作", 18),
        ("4", "收入", 8),
        ("5", "交通", 15),
        ("6", "健身", 5),
        ("7", "日常", 32),
        ("8", "娱乐", 21),
    ]
    .into_iter()
    .map(|(id, name, count)| Tag {
        id: id.to_string(),
        name: name.to_string(),
        count,
    })
    .collect()
}
