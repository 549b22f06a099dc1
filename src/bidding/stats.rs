use serde::Serialize;

use super::model::Bid;

/// 입찰 공고별 입찰 통계
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BidStats {
    pub count: usize,
    pub lowest: Option<f64>,
    pub highest: Option<f64>,
    pub average: f64,
}

/// 빈 목록이면 `count: 0, lowest/highest: None, average: 0`
pub fn bid_stats<'a>(bids: impl IntoIterator<Item = &'a Bid>) -> BidStats {
    let amounts: Vec<f64> = bids.into_iter().map(|bid| bid.amount).collect();
    if amounts.is_empty() {
        return BidStats {
            count: 0,
            lowest: None,
            highest: None,
            average: 0.0,
        };
    }

    let lowest = amounts.iter().copied().fold(f64::INFINITY, f64::min);
    let highest = amounts.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let sum: f64 = amounts.iter().sum();

    BidStats {
        count: amounts.len(),
        lowest: Some(lowest),
        highest: Some(highest),
        average: sum / amounts.len() as f64,
    }
}

/// 최저 입찰. 금액이 같으면 먼저 나온 입찰이 선택된다
pub fn lowest_bid<'a>(bids: impl IntoIterator<Item = &'a Bid>) -> Option<&'a Bid> {
    bids.into_iter().fold(None, |lowest: Option<&Bid>, current| match lowest {
        Some(lowest) if current.amount >= lowest.amount => Some(lowest),
        _ => Some(current),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bidding::model::{BidStatus, BidderSnapshot};
    use chrono::Utc;

    fn bid(id: &str, amount: f64) -> Bid {
        let now = Utc::now();
        Bid {
            id: id.to_string(),
            tender_id: "tender-1".to_string(),
            user_id: "user-1".to_string(),
            user: BidderSnapshot {
                id: "user-1".to_string(),
                name: "Demo User".to_string(),
                email: "user@demo.com".to_string(),
            },
            amount,
            proposal: None,
            delivery_timeline: None,
            company_name: None,
            status: BidStatus::Pending,
            created_at: now,
            updated_at: now,
            accepted_at: None,
            rejected_at: None,
        }
    }

    #[test]
    fn test_lowest_bid() {
        let bids = vec![bid("b1", 500.0), bid("b2", 300.0), bid("b3", 700.0)];
        assert_eq!(lowest_bid(&bids).map(|b| b.id.as_str()), Some("b2"));
    }

    #[test]
    fn test_lowest_bid_tie_keeps_first() {
        let bids = vec![bid("b1", 400.0), bid("b2", 300.0), bid("b3", 300.0)];
        assert_eq!(lowest_bid(&bids).map(|b| b.id.as_str()), Some("b2"));
        assert!(lowest_bid(&Vec::new()).is_none());
    }

    #[test]
    fn test_stats() {
        let bids = vec![bid("b1", 500.0), bid("b2", 300.0), bid("b3", 700.0)];
        let stats = bid_stats(&bids);
        assert_eq!(stats.count, 3);
        assert_eq!(stats.lowest, Some(300.0));
        assert_eq!(stats.highest, Some(700.0));
        assert_eq!(stats.average, 500.0);
    }

    #[test]
    fn test_stats_on_empty_set() {
        let stats = bid_stats(&Vec::new());
        assert_eq!(
            stats,
            BidStats {
                count: 0,
                lowest: None,
                highest: None,
                average: 0.0,
            }
        );
    }
}
