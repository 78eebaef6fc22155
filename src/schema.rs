//! Field Schema Module
//!
//! ヘッダー行（縦表ではヘッダー列）から導出されるフィールド定義を扱うモジュール。
//! 各フィールドは名前・型タグ・可視性タグの組として1つの記述子にまとめられ、
//! データセルとの対応は位置（インデックス）のみで決まります。

use crate::api::ConversionTarget;
use crate::grid::SheetGrid;

/// フィールドの型タグ
///
/// 認識されるのは小文字と先頭大文字の2表記のみです（`STRING`などは`Other`）。
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldType {
    /// `number` / `Number`: そのまま出力
    Number,

    /// `string` / `String`: ダブルクォートで囲んで出力
    String,

    /// `array` / `Array`: 波括弧で囲んで出力
    Array,

    /// その他のタグ: 数値と同様にそのまま出力
    Other(String),
}

impl FieldType {
    /// 型タグのテキストを解釈する
    pub fn parse(tag: &str) -> Self {
        match tag {
            "number" | "Number" => FieldType::Number,
            "string" | "String" => FieldType::String,
            "array" | "Array" => FieldType::Array,
            other => FieldType::Other(other.to_string()),
        }
    }
}

/// フィールドの可視性タグ
///
/// | 値 | 意味 |
/// |----|------|
/// | 0  | 常に出力 |
/// | 1  | クライアントのみ |
/// | 2  | サーバーのみ |
/// | 3  | 企画用コメント（常に除外） |
///
/// それ以外の値は、変換ターゲットのコードと一致する場合のみ出力されます。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Visibility(i64);

impl Visibility {
    /// 常に出力
    pub const ALWAYS: Visibility = Visibility(0);
    /// クライアントのみ
    pub const CLIENT_ONLY: Visibility = Visibility(1);
    /// サーバーのみ
    pub const SERVER_ONLY: Visibility = Visibility(2);
    /// 企画用コメント
    pub const COMMENT: Visibility = Visibility(3);

    /// 任意の整数タグから生成する
    pub fn new(value: i64) -> Self {
        Visibility(value)
    }

    /// セルのテキストを解釈する（整数でなければ`ALWAYS`）
    pub fn parse(text: &str) -> Self {
        text.parse::<i64>().map(Visibility).unwrap_or(Visibility::ALWAYS)
    }

    /// タグの整数値
    pub fn value(self) -> i64 {
        self.0
    }

    /// 指定ターゲットの出力に含めるかどうか
    pub fn admits(self, target: ConversionTarget) -> bool {
        match self.0 {
            0 => true,
            3 => false,
            value => value == target.code(),
        }
    }
}

/// 1フィールド分の定義
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDescriptor {
    /// フィールド名（空の場合、このフィールドは出力されない）
    pub name: String,

    /// 型タグ（型行・型列にセルが存在しない場合は`None`）
    pub field_type: Option<FieldType>,

    /// 可視性タグ
    pub visibility: Visibility,
}

impl FieldDescriptor {
    /// 新しいフィールド定義を生成
    pub fn new(name: impl Into<String>, field_type: Option<FieldType>, visibility: Visibility) -> Self {
        Self {
            name: name.into(),
            field_type,
            visibility,
        }
    }

    /// 指定ターゲットの出力に含めるかどうか（名前が空のフィールドは常に除外）
    pub fn is_emitted_for(&self, target: ConversionTarget) -> bool {
        !self.name.is_empty() && self.visibility.admits(target)
    }
}

/// フィールド定義の列
///
/// 1シートの変換の間だけ存在し、長さはヘッダーから決まった後は変化しません。
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldSchema {
    fields: Vec<FieldDescriptor>,
}

impl FieldSchema {
    /// フィールド定義の列から生成
    pub fn new(fields: Vec<FieldDescriptor>) -> Self {
        Self { fields }
    }

    /// 横表のヘッダー行（行0が名前、行1が型、行2が可視性）から構築する
    ///
    /// フィールド数は名前行の長さで決まります。シートの範囲内で空の型セルは
    /// 空の型タグ、空の可視性セルは`ALWAYS`として扱われます。
    pub fn from_header_rows(grid: &SheetGrid) -> Self {
        let fields = grid
            .get_row(0)
            .iter()
            .enumerate()
            .map(|(index, name)| {
                FieldDescriptor::new(
                    name.clone(),
                    grid.cell_in_sheet(1, index).map(FieldType::parse),
                    grid.cell_in_sheet(2, index)
                        .map(Visibility::parse)
                        .unwrap_or_default(),
                )
            })
            .collect();
        Self { fields }
    }

    /// 縦表のヘッダー列から構築する
    ///
    /// シートの各行が1フィールドに対応し、列1が名前、列2が型、列3が可視性です。
    pub fn from_field_rows(grid: &SheetGrid) -> Self {
        let fields = (0..grid.get_rows())
            .map(|row| {
                FieldDescriptor::new(
                    grid.cell_in_sheet(row, 1).unwrap_or_default(),
                    grid.cell_in_sheet(row, 2).map(FieldType::parse),
                    grid.cell_in_sheet(row, 3)
                        .map(Visibility::parse)
                        .unwrap_or_default(),
                )
            })
            .collect();
        Self { fields }
    }

    /// フィールド数
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// フィールドが存在しないかどうか
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// 指定位置のフィールド定義
    pub fn get(&self, index: usize) -> Option<&FieldDescriptor> {
        self.fields.get(index)
    }

    /// すべてのフィールド定義（宣言順）
    pub fn fields(&self) -> &[FieldDescriptor] {
        &self.fields
    }

    /// 指定位置の可視性（範囲外は`ALWAYS`）
    pub fn visibility(&self, index: usize) -> Visibility {
        self.get(index)
            .map(|field| field.visibility)
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(cells: &[&str]) -> Vec<String> {
        cells.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_field_type_parse() {
        assert_eq!(FieldType::parse("number"), FieldType::Number);
        assert_eq!(FieldType::parse("Number"), FieldType::Number);
        assert_eq!(FieldType::parse("string"), FieldType::String);
        assert_eq!(FieldType::parse("String"), FieldType::String);
        assert_eq!(FieldType::parse("array"), FieldType::Array);
        assert_eq!(FieldType::parse("Array"), FieldType::Array);
        assert_eq!(FieldType::parse("STRING"), FieldType::Other("STRING".to_string()));
        assert_eq!(FieldType::parse(""), FieldType::Other(String::new()));
    }

    #[test]
    fn test_visibility_parse() {
        assert_eq!(Visibility::parse("0"), Visibility::ALWAYS);
        assert_eq!(Visibility::parse("1"), Visibility::CLIENT_ONLY);
        assert_eq!(Visibility::parse("2"), Visibility::SERVER_ONLY);
        assert_eq!(Visibility::parse("3"), Visibility::COMMENT);
        assert_eq!(Visibility::parse("7").value(), 7);
        // 数値でないセルは常に出力扱い
        assert_eq!(Visibility::parse(""), Visibility::ALWAYS);
        assert_eq!(Visibility::parse("server"), Visibility::ALWAYS);
        assert_eq!(Visibility::parse("1.5"), Visibility::ALWAYS);
    }

    #[test]
    fn test_visibility_admits() {
        use ConversionTarget::{Client, Server};

        assert!(Visibility::ALWAYS.admits(Client));
        assert!(Visibility::ALWAYS.admits(Server));
        assert!(Visibility::CLIENT_ONLY.admits(Client));
        assert!(!Visibility::CLIENT_ONLY.admits(Server));
        assert!(!Visibility::SERVER_ONLY.admits(Client));
        assert!(Visibility::SERVER_ONLY.admits(Server));
        assert!(!Visibility::COMMENT.admits(Client));
        assert!(!Visibility::COMMENT.admits(Server));
        assert!(!Visibility::new(4).admits(Client));
        assert!(!Visibility::new(-1).admits(Server));
    }

    #[test]
    fn test_from_header_rows() {
        let grid = SheetGrid::from_rows(vec![
            row(&["id", "name", "", "tags"]),
            row(&["number", "string", "number"]),
            row(&["0", "x", "3", "1"]),
        ]);
        let schema = FieldSchema::from_header_rows(&grid);

        assert_eq!(schema.len(), 4);
        assert_eq!(
            schema.get(0),
            Some(&FieldDescriptor::new("id", Some(FieldType::Number), Visibility::ALWAYS))
        );
        assert_eq!(schema.visibility(1), Visibility::ALWAYS);
        assert_eq!(schema.visibility(2), Visibility::COMMENT);
        // シートの範囲内で省略された型セルは空の型タグ
        assert_eq!(schema.get(3).unwrap().field_type, Some(FieldType::Other(String::new())));
        assert_eq!(schema.visibility(3), Visibility::CLIENT_ONLY);
        assert_eq!(schema.visibility(99), Visibility::ALWAYS);
    }

    #[test]
    fn test_from_header_rows_short_visibility_row() {
        let grid = SheetGrid::from_rows(vec![row(&["a", "b"]), row(&["number", "number"]), vec![]]);
        let schema = FieldSchema::from_header_rows(&grid);
        assert_eq!(schema.visibility(0), Visibility::ALWAYS);
        assert_eq!(schema.visibility(1), Visibility::ALWAYS);
    }

    #[test]
    fn test_from_field_rows() {
        let grid = SheetGrid::from_rows(vec![
            row(&["#Vertical_Array", "id", "number", "0", "", "1"]),
            row(&["", "title", "string", "1", "note", "Hero"]),
            row(&["", "skills", "array", "abc"]),
            row(&["", ""]),
        ]);
        let schema = FieldSchema::from_field_rows(&grid);

        assert_eq!(schema.len(), 4);
        assert_eq!(schema.get(0).unwrap().name, "id");
        assert_eq!(schema.get(1).unwrap().field_type, Some(FieldType::String));
        assert_eq!(schema.visibility(1), Visibility::CLIENT_ONLY);
        assert_eq!(schema.get(2).unwrap().field_type, Some(FieldType::Array));
        assert_eq!(schema.visibility(2), Visibility::ALWAYS);
        assert_eq!(schema.get(3).unwrap().name, "");
        assert_eq!(schema.get(3).unwrap().field_type, Some(FieldType::Other(String::new())));
    }

    #[test]
    fn test_is_emitted_for() {
        let named = FieldDescriptor::new("hp", Some(FieldType::Number), Visibility::SERVER_ONLY);
        assert!(named.is_emitted_for(ConversionTarget::Server));
        assert!(!named.is_emitted_for(ConversionTarget::Client));

        let unnamed = FieldDescriptor::new("", Some(FieldType::Number), Visibility::ALWAYS);
        assert!(!unnamed.is_emitted_for(ConversionTarget::Client));
    }
}
