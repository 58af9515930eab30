//! 自选列表 - 静态报价展示数据

/// 涨跌方向
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
}

/// 一行报价
#[derive(Debug, Clone, PartialEq)]
pub struct QuoteRow {
    pub symbol: String,
    /// 已格式化的价格文本
    pub price: String,
    pub change_percent: f64,
}

impl QuoteRow {
    pub fn new(symbol: &str, price: &str, change_percent: f64) -> Self {
        Self {
            symbol: symbol.to_string(),
            price: price.to_string(),
            change_percent,
        }
    }

    /// 涨跌幅为0时视为上涨
    pub fn direction(&self) -> Direction {
        if self.change_percent >= 0.0 {
            Direction::Up
        } else {
            Direction::Down
        }
    }

    /// 涨跌幅文本，只显示绝对值，方向由箭头和颜色表达
    pub fn change_label(&self) -> String {
        format!("{}%", self.change_percent.abs())
    }

    /// 成交量说明（固定文本）
    pub fn volume_caption(&self) -> &'static str {
        "Vol: 24M"
    }

    /// 品种名是否包含查询串（忽略大小写）
    pub fn matches(&self, query: &str) -> bool {
        let query = query.trim();
        query.is_empty() || self.symbol.to_lowercase().contains(&query.to_lowercase())
    }
}

/// 带标题的一组报价
#[derive(Debug, Clone, PartialEq)]
pub struct WatchlistSection {
    pub title: String,
    pub rows: Vec<QuoteRow>,
}

/// 自选列表
#[derive(Debug, Clone, PartialEq)]
pub struct Watchlist {
    sections: Vec<WatchlistSection>,
}

impl Watchlist {
    pub fn new(sections: Vec<WatchlistSection>) -> Self {
        Self { sections }
    }

    /// 内置的展示数据
    pub fn fixtures() -> Self {
        Self::new(vec![
            WatchlistSection {
                title: "Favorites".to_string(),
                rows: vec![
                    QuoteRow::new("BTC/USD", "64,231.50", 1.2),
                    QuoteRow::new("ETH/USD", "3,452.10", -0.5),
                    QuoteRow::new("SOL/USD", "145.20", 4.3),
                    QuoteRow::new("SPX", "5,100.20", 0.1),
                ],
            },
            WatchlistSection {
                title: "Indices".to_string(),
                rows: vec![
                    QuoteRow::new("NDX", "18,200.50", -1.2),
                    QuoteRow::new("DJI", "39,100.00", 0.4),
                ],
            },
        ])
    }

    pub fn sections(&self) -> &[WatchlistSection] {
        &self.sections
    }

    /// 报价总行数
    pub fn len(&self) -> usize {
        self.sections.iter().map(|s| s.rows.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// 按品种名过滤，没有匹配行的分组被隐藏
    pub fn filter<'a>(&'a self, query: &str) -> Vec<(&'a str, Vec<&'a QuoteRow>)> {
        self.sections
            .iter()
            .filter_map(|section| {
                let rows: Vec<&QuoteRow> = section.rows.iter().filter(|row| row.matches(query)).collect();
                if rows.is_empty() {
                    None
                } else {
                    Some((section.title.as_str(), rows))
                }
            })
            .collect()
    }
}

impl Default for Watchlist {
    fn default() -> Self {
        Self::fixtures()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixture_contents() {
        let watchlist = Watchlist::fixtures();
        assert_eq!(watchlist.sections().len(), 2);
        assert_eq!(watchlist.len(), 6);
        assert_eq!(watchlist.sections()[0].title, "Favorites");
        assert_eq!(watchlist.sections()[1].rows[1].symbol, "DJI");
    }

    #[test]
    fn test_change_label_and_direction() {
        let eth = QuoteRow::new("ETH/USD", "3,452.10", -0.5);
        assert_eq!(eth.direction(), Direction::Down);
        assert_eq!(eth.change_label(), "0.5%");

        let flat = QuoteRow::new("FLAT", "1.00", 0.0);
        assert_eq!(flat.direction(), Direction::Up);
        assert_eq!(flat.change_label(), "0%");

        let sol = QuoteRow::new("SOL/USD", "145.20", 4.3);
        assert_eq!(sol.change_label(), "4.3%");
    }

    #[test]
    fn test_filter_hides_empty_sections() {
        let watchlist = Watchlist::fixtures();

        let all = watchlist.filter("   ");
        assert_eq!(all.len(), 2);

        let usd = watchlist.filter("usd");
        assert_eq!(usd.len(), 1);
        assert_eq!(usd[0].0, "Favorites");
        assert_eq!(usd[0].1.len(), 3);

        let dji = watchlist.filter("DJ");
        assert_eq!(dji, vec![("Indices", vec![&watchlist.sections()[1].rows[1]])]);

        assert!(watchlist.filter("xyz").is_empty());
    }
}
