//! Built-in Banglish → Bangla word list for the "অপরিচিতা" corpus.
//!
//! Order is significant: replacements run top to bottom.

pub const BUILTIN_MAPPINGS: &[(&str, &str)] = &[
    ("anupam", "অনুপম"),
    ("kalyani", "কল্যাণী"),
    ("mama", "মামা"),
    ("aparichita", "অপরিচিতা"),
    ("rabindranath", "রবীন্দ্রনাথ"),
    ("tagore", "ঠাকুর"),
    ("golpo", "গল্প"),
    ("charitra", "চরিত্র"),
    ("biyer", "বিয়ের"),
    ("biye", "বিয়ে"),
    ("shikkha", "শিক্ষা"),
    ("nari", "নারী"),
    ("meye", "মেয়ে"),
    ("chele", "ছেলে"),
    ("baba", "বাবা"),
    ("ma", "মা"),
    ("maa", "মা"),
    ("ghor", "ঘর"),
    ("bashay", "বাসায়"),
    ("basha", "বাসা"),
    ("school", "স্কুল"),
    ("college", "কলেজ"),
    ("english", "ইংরেজি"),
    ("bangla", "বাংলা"),
    ("question", "প্রশ্ন"),
    ("proshno", "প্রশ্ন"),
    ("uttor", "উত্তর"),
    ("answer", "উত্তর"),
    ("ki", "কি"),
    ("kemon", "কেমন"),
    ("keno", "কেন"),
    ("kothai", "কোথায়"),
    ("kokhon", "কখন"),
    ("kar", "কার"),
    ("koto", "কত"),
    ("kotogulo", "কতগুলো"),
    ("amra", "আমরা"),
    ("tumi", "তুমি"),
    ("tomar", "তোমার"),
    ("amar", "আমার"),
    ("tar", "তার"),
    ("oder", "তাদের"),
    ("kore", "করে"),
    ("korte", "করতে"),
    ("korchi", "করছি"),
    ("korbo", "করবো"),
    ("hobe", "হবে"),
    ("hoye", "হয়ে"),
    ("hoyeche", "হয়েছে"),
    ("ache", "আছে"),
    ("chilo", "ছিল"),
    ("chile", "ছিলে"),
    ("chole", "চলে"),
    ("gele", "গেলে"),
    ("gelo", "গেলো"),
    ("elo", "এলো"),
    ("esho", "এসো"),
    ("dekho", "দেখো"),
    ("dekhi", "দেখি"),
    ("bolo", "বলো"),
    ("boli", "বলি"),
    ("bole", "বলে"),
    ("boleche", "বলেছে"),
    ("shono", "শোনো"),
    ("shuni", "শুনি"),
    ("age", "আগে"),
    ("pore", "পরে"),
    ("ekhon", "এখন"),
    ("kal", "কাল"),
    ("aj", "আজ"),
    ("ajke", "আজকে"),
    ("valo", "ভালো"),
    ("valobashe", "ভালোবাসে"),
    ("kharap", "খারাপ"),
    ("sundor", "সুন্দর"),
    ("bhalo", "ভালো"),
    ("kalo", "কালো"),
    ("shada", "সাদা"),
    ("lal", "লাল"),
    ("nil", "নীল"),
    ("holud", "হলুদ"),
    ("sobuj", "সবুজ"),
    ("boro", "বড়ো"),
    ("choto", "ছোটো"),
    ("meyer", "মেয়ের"),
    ("cheler", "ছেলের"),
    ("babar", "বাবার"),
    ("mayer", "মায়ের"),
    ("family", "পরিবার"),
    ("poribar", "পরিবার"),
    ("shathe", "সাথে"),
    ("shomoye", "সময়ে"),
    ("shomoy", "সময়"),
    ("jaygay", "জায়গায়"),
    ("jayga", "জায়গা"),
    ("theme", "বিষয়"),
    ("bishoy", "বিষয়"),
    ("ghotona", "ঘটনা"),
    ("ghote", "ঘটে"),
    ("hoy", "হয়"),
    ("na", "না"),
    ("nai", "নাই"),
    ("nei", "নেই"),
    ("eto", "এতো"),
    ("oi", "ওই"),
    ("ei", "এই"),
    ("shei", "সেই"),
    ("je", "যে"),
    ("jar", "যার"),
    ("jeta", "যেটা"),
    ("jegulo", "যেগুলো"),
    ("analysis", "বিশ্লেষণ"),
    ("bishleshan", "বিশ্লেষণ"),
    ("character", "চরিত্র"),
    ("importance", "গুরুত্ব"),
    ("gurutto", "গুরুত্ব"),
    ("love", "ভালোবাসা"),
    ("valobasha", "ভালোবাসা"),
    ("marriage", "বিবাহ"),
    ("bibaho", "বিবাহ"),
    ("society", "সমাজ"),
    ("shomaj", "সমাজ"),
    ("social", "সামাজিক"),
    ("shamajik", "সামাজিক"),
    ("education", "শিক্ষা"),
    ("woman", "নারী"),
    ("women", "নারী"),
    ("girl", "মেয়ে"),
    ("boy", "ছেলে"),
    ("man", "পুরুষ"),
    ("purush", "পুরুষ"),
    ("lok", "লোক"),
    ("manush", "মানুষ"),
    ("jonnyo", "জন্য"),
    ("jonno", "জন্য"),
    ("main", "মূল"),
    ("mul", "মূল"),
    ("story", "গল্প"),
    ("kotha", "কথা"),
    ("kobitay", "কবিতায়"),
    ("kobita", "কবিতা"),
    ("lekhok", "লেখক"),
    ("lekha", "লেখা"),
    ("likhe", "লিখে"),
    ("likhte", "লিখতে"),
    ("lekhen", "লেখেন"),
    ("lekheni", "লেখেনি"),
    ("boi", "বই"),
    ("book", "বই"),
    ("page", "পাতা"),
    ("pata", "পাতা"),
    ("number", "নম্বর"),
    ("nombor", "নম্বর"),
    ("details", "বিস্তারিত"),
    ("bistari", "বিস্তারিত"),
    ("bishesh", "বিশেষ"),
    ("special", "বিশেষ"),
    ("important", "গুরুত্বপূর্ণ"),
    ("guruttopurno", "গুরুত্বপূর্ণ"),
    ("interesting", "মজার"),
    ("mojar", "মজার"),
    ("shundor", "সুন্দর"),
    ("cute", "সুন্দর"),
    ("smart", "চালাক"),
    ("chalak", "চালাক"),
    ("wise", "জ্ঞানী"),
    ("gyani", "জ্ঞানী"),
    ("foolish", "বোকা"),
    ("boka", "বোকা"),
    ("stupid", "বোকা"),
    ("anupamer", "অনুপমের"),
    ("kalyanir", "কল্যাণীর"),
    ("mamar", "মামার"),
    ("golper", "গল্পের"),
    ("boyosh", "বয়স"),
    ("boyos", "বয়স"),
    ("bhumika", "ভূমিকা"),
    ("ke", "কে"),
];

/// Romanized words whose presence marks a query as Banglish.
pub const ROMANIZED_INDICATORS: &[&str] = &[
    "anupam", "kalyani", "mama", "golpo", "charitra", "ki", "kemon", "keno",
    "tar", "tomar", "amar", "ache", "chilo", "hoy", "kore", "bole",
    "dekho", "valo", "bhalo", "meyer", "cheler", "age", "pore", "ekhon",
];
