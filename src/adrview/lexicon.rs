//! # Lexicon: Multilingual Metadata Keywords
//!
//! ADRs are written in many languages. The parser recognizes a "status" section,
//! a "date" field and the status values themselves through keyword tables keyed
//! by language code.
//!
//! A [`Lexicon`] is a plain value. [`Lexicon::default`] builds the built-in
//! table covering English, Japanese, Spanish, French, Chinese and Korean; tests
//! and users can build their own with [`Lexicon::empty`] and the `with_*`
//! builders, or load one from JSON with [`Lexicon::load`].
//!
//! ## JSON Shape
//!
//! ```text
//! {
//!   "field_names": { "status": { "en": ["status"] }, "date": { "en": ["date"] } },
//!   "status_values": { "Accepted": { "en": ["accepted"] } }
//! }
//! ```

use crate::error::{AdrError, Result};
use crate::model::Status;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

/// Language codes covered by the built-in table, in display order.
pub const SUPPORTED_LANGUAGES: [&str; 6] = ["en", "ja", "es", "fr", "zh", "ko"];

/// Metadata fields whose labels are recognized by keyword.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Status,
    Date,
}

type KeywordTable = BTreeMap<String, Vec<String>>;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldNames {
    #[serde(default)]
    pub status: KeywordTable,
    #[serde(default)]
    pub date: KeywordTable,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Lexicon {
    #[serde(default)]
    pub field_names: FieldNames,
    #[serde(default)]
    pub status_values: BTreeMap<Status, KeywordTable>,
}

const STATUS_FIELD: &[(&str, &[&str])] = &[
    ("en", &["status"]),
    ("ja", &["ステータス"]),
    ("es", &["estado"]),
    ("fr", &["statut"]),
    ("zh", &["状态"]),
    ("ko", &["상태"]),
];

const DATE_FIELD: &[(&str, &[&str])] = &[
    ("en", &["date", "created", "updated"]),
    ("ja", &["日付", "作成日", "更新日"]),
    ("es", &["fecha", "creado", "actualizado"]),
    ("fr", &["date", "créé", "mis à jour"]),
    ("zh", &["日期", "创建时间", "更新时间"]),
    ("ko", &["날짜", "생성일", "수정일"]),
];

const ACCEPTED: &[(&str, &[&str])] = &[
    ("en", &["accepted", "approved", "active", "adopted"]),
    ("ja", &["承認", "採用", "承諾", "受諾"]),
    ("es", &["aceptado", "aprobado", "adoptado"]),
    ("fr", &["accepté", "approuvé", "adopté"]),
    ("zh", &["接受", "批准", "采用"]),
    ("ko", &["승인", "수락", "채택"]),
];

const DEPRECATED: &[(&str, &[&str])] = &[
    ("en", &["deprecated", "obsolete", "outdated"]),
    ("ja", &["非推奨", "廃止予定", "旧式"]),
    ("es", &["obsoleto", "desaprobado", "anticuado"]),
    ("fr", &["déprécié", "obsolète", "périmé"]),
    ("zh", &["已弃用", "过时", "废弃"]),
    ("ko", &["사용 중단", "폐기 예정", "구식"]),
];

const SUPERSEDED: &[(&str, &[&str])] = &[
    ("en", &["superseded", "replaced", "substituted"]),
    ("ja", &["置換", "代替", "更新"]),
    ("es", &["reemplazado", "sustituido", "superado"]),
    ("fr", &["remplacé", "substitué", "supplanté"]),
    ("zh", &["已替代", "已取代", "已更新"]),
    ("ko", &["대체됨", "교체됨", "갱신됨"]),
];

const REJECTED: &[(&str, &[&str])] = &[
    ("en", &["rejected", "declined", "refused"]),
    ("ja", &["却下", "拒否", "否決"]),
    ("es", &["rechazado", "denegado", "rehusado"]),
    ("fr", &["rejeté", "refusé", "décliné"]),
    ("zh", &["拒绝", "否决", "驳回"]),
    ("ko", &["거부", "반려", "기각"]),
];

const PROPOSED: &[(&str, &[&str])] = &[
    ("en", &["proposed", "draft", "pending", "under review"]),
    ("ja", &["提案", "下書き", "保留中", "検討中"]),
    ("es", &["propuesto", "borrador", "pendiente", "en revisión"]),
    ("fr", &["proposé", "brouillon", "en attente", "en révision"]),
    ("zh", &["提议", "草案", "待定", "审核中"]),
    ("ko", &["제안", "초안", "보류", "검토 중"]),
];

const UNKNOWN: &[(&str, &[&str])] = &[
    ("en", &["unknown", "undefined", "unclear"]),
    ("ja", &["不明", "未定義", "不明確"]),
    ("es", &["desconocido", "indefinido", "incierto"]),
    ("fr", &["inconnu", "indéfini", "incertain"]),
    ("zh", &["未知", "未定义", "不明确"]),
    ("ko", &["알 수 없음", "정의되지 않음", "불분명"]),
];

fn table(rows: &[(&str, &[&str])]) -> KeywordTable {
    rows.iter()
        .map(|(lang, words)| {
            (
                lang.to_string(),
                words.iter().map(|w| w.to_string()).collect(),
            )
        })
        .collect()
}

impl Default for Lexicon {
    fn default() -> Self {
        let status_values = [
            (Status::Accepted, ACCEPTED),
            (Status::Deprecated, DEPRECATED),
            (Status::Superseded, SUPERSEDED),
            (Status::Rejected, REJECTED),
            (Status::Proposed, PROPOSED),
            (Status::Unknown, UNKNOWN),
        ]
        .into_iter()
        .map(|(status, rows)| (status, table(rows)))
        .collect();

        Self {
            field_names: FieldNames {
                status: table(STATUS_FIELD),
                date: table(DATE_FIELD),
            },
            status_values,
        }
    }
}

impl Lexicon {
    /// A lexicon with no keywords at all. Nothing will be recognized until
    /// keywords are added.
    pub fn empty() -> Self {
        Self {
            field_names: FieldNames::default(),
            status_values: BTreeMap::new(),
        }
    }

    pub fn with_field_keyword(mut self, field: Field, lang: &str, keyword: &str) -> Self {
        self.field_table_mut(field)
            .entry(lang.to_string())
            .or_default()
            .push(keyword.to_string());
        self
    }

    pub fn with_status_keyword(mut self, status: Status, lang: &str, keyword: &str) -> Self {
        self.status_values
            .entry(status)
            .or_default()
            .entry(lang.to_string())
            .or_default()
            .push(keyword.to_string());
        self
    }

    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(AdrError::Serialization)
    }

    /// Loads a lexicon from a JSON file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(|source| {
            AdrError::FileRead {
                path: path.as_ref().to_path_buf(),
                source,
            }
        })?;
        Self::from_json(&content)
    }

    fn field_table(&self, field: Field) -> &KeywordTable {
        match field {
            Field::Status => &self.field_names.status,
            Field::Date => &self.field_names.date,
        }
    }

    fn field_table_mut(&mut self, field: Field) -> &mut KeywordTable {
        match field {
            Field::Status => &mut self.field_names.status,
            Field::Date => &mut self.field_names.date,
        }
    }

    /// Every label for `field`, across all languages.
    pub fn field_keywords(&self, field: Field) -> Vec<&str> {
        self.field_table(field)
            .values()
            .flatten()
            .map(String::as_str)
            .collect()
    }

    /// Labels for `field` in one language; empty for unknown languages.
    pub fn field_keywords_for(&self, field: Field, lang: &str) -> &[String] {
        self.field_table(field)
            .get(lang)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Every synonym of `status`, across all languages.
    pub fn status_keywords(&self, status: Status) -> Vec<&str> {
        self.status_values
            .get(&status)
            .map(|by_lang| by_lang.values().flatten().map(String::as_str).collect())
            .unwrap_or_default()
    }

    pub fn status_keywords_for(&self, status: Status, lang: &str) -> &[String] {
        self.status_values
            .get(&status)
            .and_then(|by_lang| by_lang.get(lang))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Every status synonym of every status.
    pub fn all_status_values(&self) -> Vec<&str> {
        Status::ALL
            .iter()
            .flat_map(|status| self.status_keywords(*status))
            .collect()
    }

    /// Language codes that appear anywhere in this lexicon, sorted.
    pub fn languages(&self) -> Vec<&str> {
        let mut langs: Vec<&str> = self
            .field_names
            .status
            .keys()
            .chain(self.field_names.date.keys())
            .chain(self.status_values.values().flat_map(|t| t.keys()))
            .map(String::as_str)
            .collect();
        langs.sort_unstable();
        langs.dedup();
        langs
    }
}
