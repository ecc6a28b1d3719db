use vocab_core::{Denylist, OverrideTable};

/// Curated English -> Thai translations for common or previously broken words
const OVERRIDES: &[(&str, &str)] = &[
    ("a", "หนึ่ง / ก"),
    ("an", "หนึ่ง / ก"),
    ("the", "นี่ / นั้น"),
    ("about", "เกี่ยวกับ / ประมาณ"),
    ("across", "ข้าม / ตลอด"),
    ("against", "ต่อต้าน / พิง / กับ"),
    ("all", "ทั้งหมด / ทุกสิ่ง"),
    ("and", "และ"),
    ("as", "เหมือน / ในฐานะ"),
    ("at", "ที่"),
    ("aim", "จุดมุ่งหมาย / เป้าหมาย"),
    ("addition", "การเพิ่ม / ส่วนเพิ่มเติม"),
    ("alcohol", "แอลกอฮอล์"),
    ("ankle", "ข้อเท้า"),
    ("assess", "ประเมิน"),
    ("atmosphere", "บรรยากาศ"),
    ("awful", "แย่มาก / น่ากลัว"),
    ("benefit", "ประโยชน์ / ผลประโยชน์"),
    ("blame", "ตำหนิ / กล่าวโทษ"),
    ("blank", "ว่าง / ช่องว่าง"),
    ("block", "กั้น / บล็อก / ก้อน"),
    ("bond", "ข้อผูกมัด / พันธะ"),
    ("boyfriend", "แฟนหนุ่ม"),
    ("breast", "หน้าอก / เต้านม"),
    ("call", "เรียก / โทร"),
    ("can1 modal", "สามารถ"),
    ("capital", "เมืองหลวง / เงินทุน"),
    ("coast", "ชายฝั่ง"),
    ("combine", "ผสม / รวมกัน"),
    ("convince", "โน้มน้าว / ทำให้เชื่อ"),
    ("actually", "จริงๆ แล้ว"),
    ("according to", "ตาม / ตามที่"),
    ("active", "คล่องแคล่ว / กระตือรือร้น"),
    ("advance", "ล่วงหน้า / พัฒนา"),
    ("acceptable", "ยอมรับได้"),
    ("access", "เข้าถึง / ทางเข้า"),
    ("accident", "อุบัติเหตุ"),
    ("accommodation", "ที่พัก"),
    ("accompany", "ไปเป็นเพื่อน / มาพร้อมกับ"),
    ("account", "บัญชี / รายงาน"),
    ("accurate", "แม่นยำ / ถูกต้อง"),
    ("accuse", "กล่าวหา / กล่าวโทษ"),
    ("achieve", "บรรลุ / สำเร็จ"),
    ("achievement", "ความสำเร็จ"),
    ("acknowledge", "ยอมรับ / รับทราบ"),
    ("acquire", "ได้รับ / ได้มา"),
    ("act", "แสดง / กระทำ / กฎหมาย"),
    ("action", "การกระทำ"),
    ("after", "หลังจาก"),
    ("already", "เรียบร้อยแล้ว"),
    ("apple", "แอปเปิ้ล"),
    ("association", "สมาคม"),
    ("balance", "สมดุล / ยอดคงเหลือ"),
    ("ban", "ห้าม / สั่งห้าม"),
    ("base", "ฐาน / พื้นฐาน"),
    ("based", "อิงตาม / ขึ้นอยู่กับ"),
    ("beer", "เบียร์"),
    ("kilogram", "กิโลกรัม"),
];

/// Words whose scraped translations were known to be wrong
const DENYLIST: &[&str] = &[
    "aim", "assess", "ankle", "boyfriend", "breast", "call", "capital", "coast",
];

pub fn default_overrides() -> OverrideTable {
    OverrideTable::from_pairs(OVERRIDES.iter().copied())
}

pub fn default_denylist() -> Denylist {
    Denylist::from_words(DENYLIST.iter().copied())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ThaiScript;
    use vocab_core::ScriptProfile;

    #[test]
    fn test_defaults_loaded() {
        let overrides = default_overrides();
        assert_eq!(overrides.len(), OVERRIDES.len());
        assert_eq!(overrides.get("Kilogram"), Some("กิโลกรัม"));
        assert!(default_denylist().contains("Coast"));
    }

    #[test]
    fn test_every_override_is_thai() {
        for (word, value) in OVERRIDES {
            assert!(ThaiScript.is_dominant(value, 0.5), "override for {word} is not Thai");
        }
    }
}
