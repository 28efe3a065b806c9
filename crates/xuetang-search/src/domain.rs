//! Topical domain detection.
//!
//! Each [`Domain`] has a static descriptor with bilingual keywords. An item
//! belongs to every domain whose keyword occurs as a substring of its
//! lowercased title, summary (or description), and tags. There is no
//! tokenization: a keyword embedded in a longer word still counts.

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use xuetang_content::{Course, Resource};

/// A topical category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Domain {
    Urban,
    Environmental,
    Transportation,
    Social,
    Economics,
    Computational,
}

/// Static description of a domain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DomainInfo {
    pub domain: Domain,
    pub label_en: &'static str,
    pub label_zh: &'static str,
    /// Representative software.
    pub tools: &'static [&'static str],
    /// Representative methods.
    pub methods: &'static [&'static str],
    /// Lowercase match terms, English and Chinese.
    pub keywords: &'static [&'static str],
}

static DOMAINS: [DomainInfo; 6] = [
    DomainInfo {
        domain: Domain::Urban,
        label_en: "Urban Studies",
        label_zh: "城市研究",
        tools: &["QGIS", "GeoPandas", "OSMnx", "ArcGIS"],
        methods: &["spatial analysis", "urban morphology", "land-use modeling"],
        keywords: &[
            "urban", "city", "cities", "land use", "housing", "neighborhood", "gis", "spatial",
            "城市", "城镇", "土地利用", "住房", "街区", "空间",
        ],
    },
    DomainInfo {
        domain: Domain::Environmental,
        label_en: "Environmental Science",
        label_zh: "环境科学",
        tools: &["Google Earth Engine", "xarray", "rasterio"],
        methods: &["remote sensing", "emission inventories", "ecological modeling"],
        keywords: &[
            "environment", "climate", "pollution", "air quality", "ecology", "carbon",
            "remote sensing", "环境", "气候", "污染", "生态", "碳", "遥感",
        ],
    },
    DomainInfo {
        domain: Domain::Transportation,
        label_en: "Transportation",
        label_zh: "交通运输",
        tools: &["SUMO", "MATSim", "GTFS Kit"],
        methods: &["travel demand modeling", "network assignment", "trajectory mining"],
        keywords: &[
            "traffic", "transport", "transit", "mobility", "commute", "travel", "gtfs",
            "交通", "出行", "通勤", "地铁", "公交",
        ],
    },
    DomainInfo {
        domain: Domain::Social,
        label_en: "Social Science",
        label_zh: "社会科学",
        tools: &["NetworkX", "R", "Stata"],
        methods: &["survey analysis", "social network analysis", "text analysis"],
        keywords: &[
            "social", "society", "demograph", "inequality", "survey", "population",
            "社会", "人口", "不平等", "问卷", "社交",
        ],
    },
    DomainInfo {
        domain: Domain::Economics,
        label_en: "Economics",
        label_zh: "经济学",
        tools: &["statsmodels", "linearmodels", "Stata"],
        methods: &["econometrics", "causal inference", "input-output analysis"],
        keywords: &[
            "economic", "economy", "econometric", "market", "price", "finance",
            "经济", "市场", "价格", "金融", "计量",
        ],
    },
    DomainInfo {
        domain: Domain::Computational,
        label_en: "Computational Methods",
        label_zh: "计算方法",
        tools: &["PyTorch", "scikit-learn", "Mesa", "NetLogo"],
        methods: &["machine learning", "agent-based modeling", "simulation"],
        keywords: &[
            "computational", "simulation", "machine learning", "deep learning", "neural",
            "algorithm", "agent-based", "计算", "模拟", "仿真", "机器学习", "深度学习", "算法",
        ],
    },
];

impl Domain {
    /// Every domain, in declaration order.
    pub const ALL: [Domain; 6] = [
        Domain::Urban,
        Domain::Environmental,
        Domain::Transportation,
        Domain::Social,
        Domain::Economics,
        Domain::Computational,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Domain::Urban => "urban",
            Domain::Environmental => "environmental",
            Domain::Transportation => "transportation",
            Domain::Social => "social",
            Domain::Economics => "economics",
            Domain::Computational => "computational",
        }
    }

    /// The static descriptor.
    pub fn info(self) -> &'static DomainInfo {
        &DOMAINS[self as usize]
    }

    /// All descriptors, in declaration order.
    pub fn descriptors() -> &'static [DomainInfo] {
        &DOMAINS
    }
}

impl fmt::Display for Domain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Domain {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Domain::ALL
            .into_iter()
            .find(|d| d.as_str() == s)
            .ok_or_else(|| format!("unknown domain '{s}'"))
    }
}

/// Text an item exposes to domain detection.
pub trait DomainText {
    /// Title, summary or description, and tags joined by spaces.
    fn domain_text(&self) -> String;
}

impl DomainText for Course {
    fn domain_text(&self) -> String {
        format!("{} {} {}", self.title, self.summary, self.tags.join(" "))
    }
}

impl DomainText for Resource {
    fn domain_text(&self) -> String {
        format!("{} {} {}", self.title, self.description, self.tags.join(" "))
    }
}

/// Domains whose keywords occur in `item`'s text.
pub fn detect<T: DomainText + ?Sized>(item: &T) -> BTreeSet<Domain> {
    detect_text(&item.domain_text())
}

/// Domains whose keywords occur in `text` (case-insensitive).
pub fn detect_text(text: &str) -> BTreeSet<Domain> {
    let haystack = text.to_lowercase();
    DOMAINS
        .iter()
        .filter(|info| info.keywords.iter().any(|k| haystack.contains(k)))
        .map(|info| info.domain)
        .collect()
}
