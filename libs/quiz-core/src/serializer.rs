//! Moodle XML serializer.
//!
//! Produces one `<question type="multichoice">` element per question. Output
//! is a pure function of the questions, the options and the image table.

use crate::images::ImageTable;
use crate::markup::{cdata, escape_xml, resolve_images, strip_emphasis, text_to_html};
use crate::types::{AnswerFormat, Question, QuizOption, XmlOptions};

/// Serialize with default layout and the given shuffle flag.
pub fn serialize(questions: &[Question], shuffle: bool, images: &ImageTable) -> String {
    serialize_with(questions, &XmlOptions::default().with_shuffle(shuffle), images)
}

/// Serialize questions into a Moodle XML quiz document.
pub fn serialize_with(questions: &[Question], options: &XmlOptions, images: &ImageTable) -> String {
    let mut xml = String::from("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<quiz>\n");

    for (idx, question) in questions.iter().enumerate() {
        write_question(&mut xml, question, idx + 1, options, images);
    }

    xml.push_str("</quiz>");
    xml
}

fn write_question(
    xml: &mut String,
    question: &Question,
    position: usize,
    options: &XmlOptions,
    images: &ImageTable,
) {
    let name = if question.identifier.is_empty() {
        format!("Q{}", position)
    } else {
        escape_xml(&question.identifier)
    };

    let mut body = text_to_html(&resolve_images(&question.question_text, images));
    if options.wrap_paragraph {
        body = format!("<p>{}</p>", body);
    }

    xml.push_str("  <question type=\"multichoice\">\n");
    xml.push_str(&format!("    <name><text>{}</text></name>\n", name));
    xml.push_str("    <questiontext format=\"html\">\n");
    xml.push_str(&format!("      <text>{}</text>\n", cdata(&body)));
    xml.push_str("    </questiontext>\n");
    xml.push_str(&format!(
        "    <shuffleanswers>{}</shuffleanswers>\n",
        if options.shuffle { "1" } else { "0" }
    ));
    for option in &question.options {
        write_answer(xml, question, option, options.answer_format);
    }
    xml.push_str("  </question>\n");
}

fn write_answer(xml: &mut String, question: &Question, option: &QuizOption, format: AnswerFormat) {
    let fraction = if question.is_correct(option) { "100" } else { "0" };
    match format {
        AnswerFormat::Html => xml.push_str(&format!(
            "    <answer fraction=\"{}\" format=\"html\"><text>{}</text></answer>\n",
            fraction,
            cdata(&format!("<p>{}</p>", option.text))
        )),
        AnswerFormat::PlainText => xml.push_str(&format!(
            "    <answer fraction=\"{}\"><text>{}</text></answer>\n",
            fraction,
            strip_emphasis(&option.text)
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse;
    use pretty_assertions::assert_eq;

    fn question(identifier: &str, text: &str, correct: Option<char>) -> Question {
        Question {
            identifier: identifier.to_string(),
            question_text: text.to_string(),
            options: vec![
                QuizOption {
                    letter: 'a',
                    text: "Yes".to_string(),
                },
                QuizOption {
                    letter: 'b',
                    text: "No".to_string(),
                },
            ],
            correct_answer: correct,
        }
    }

    #[test]
    fn full_document_html_layout() {
        let xml = serialize(
            &[question("1.", "Line one\nLine two", Some('b'))],
            false,
            &ImageTable::new(),
        );
        let expected = concat!(
            "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n",
            "<quiz>\n",
            "  <question type=\"multichoice\">\n",
            "    <name><text>1.</text></name>\n",
            "    <questiontext format=\"html\">\n",
            "      <text><![CDATA[<p>Line one<br>Line two</p>]]></text>\n",
            "    </questiontext>\n",
            "    <shuffleanswers>0</shuffleanswers>\n",
            "    <answer fraction=\"0\" format=\"html\"><text><![CDATA[<p>Yes</p>]]></text></answer>\n",
            "    <answer fraction=\"100\" format=\"html\"><text><![CDATA[<p>No</p>]]></text></answer>\n",
            "  </question>\n",
            "</quiz>",
        );
        assert_eq!(xml, expected);
    }

    #[test]
    fn full_document_plain_layout() {
        let options = XmlOptions {
            shuffle: true,
            wrap_paragraph: false,
            answer_format: AnswerFormat::PlainText,
        };
        let xml = serialize_with(
            &[question("Questão 1", "Q", Some('a'))],
            &options,
            &ImageTable::new(),
        );
        let expected = concat!(
            "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n",
            "<quiz>\n",
            "  <question type=\"multichoice\">\n",
            "    <name><text>Questão 1</text></name>\n",
            "    <questiontext format=\"html\">\n",
            "      <text><![CDATA[Q]]></text>\n",
            "    </questiontext>\n",
            "    <shuffleanswers>1</shuffleanswers>\n",
            "    <answer fraction=\"100\"><text>Yes</text></answer>\n",
            "    <answer fraction=\"0\"><text>No</text></answer>\n",
            "  </question>\n",
            "</quiz>",
        );
        assert_eq!(xml, expected);
    }

    #[test]
    fn plain_layout_answers_carry_no_markup() {
        let options = XmlOptions {
            answer_format: AnswerFormat::PlainText,
            ..XmlOptions::default()
        };
        let questions = parse("1. Q\na) *seven* {correta}\nb) 5 < 7");
        let xml = serialize_with(&questions, &options, &ImageTable::new());

        assert!(xml.contains("<answer fraction=\"100\"><text>seven</text></answer>"));
        assert!(xml.contains("<answer fraction=\"0\"><text>5 &lt; 7</text></answer>"));
        assert!(!xml.contains("<strong>"));
    }

    #[test]
    fn empty_question_list() {
        let xml = serialize(&[], false, &ImageTable::new());
        assert_eq!(xml, "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<quiz>\n</quiz>");
    }

    #[test]
    fn shuffle_flag_is_the_only_difference() {
        let questions = parse("1. Q\na) A {correta}\nb) B\n2. R\na) C");
        let images = ImageTable::new();
        let on = serialize(&questions, true, &images);
        let off = serialize(&questions, false, &images);

        assert_eq!(on.matches("<shuffleanswers>1</shuffleanswers>").count(), 2);
        assert_eq!(off.matches("<shuffleanswers>0</shuffleanswers>").count(), 2);
        assert_eq!(
            on.replace("<shuffleanswers>1</shuffleanswers>", "<shuffleanswers>0</shuffleanswers>"),
            off
        );
    }

    #[test]
    fn deterministic_output() {
        let questions = parse("1. Q\na) A\nb) B {correto}");
        let images = ImageTable::new();
        assert_eq!(
            serialize(&questions, false, &images),
            serialize(&questions, false, &images)
        );
    }

    #[test]
    fn fallback_name_for_empty_identifier() {
        let xml = serialize(
            &[question("1.", "A", None), question("", "B", None)],
            false,
            &ImageTable::new(),
        );
        assert!(xml.contains("<name><text>Q2</text></name>"));
    }

    #[test]
    fn no_correct_answer_scores_all_zero() {
        let xml = serialize(&[question("1.", "Q", None)], false, &ImageTable::new());
        assert!(!xml.contains("fraction=\"100\""));
        assert_eq!(xml.matches("fraction=\"0\"").count(), 2);
    }

    #[test]
    fn reserved_characters_escaped_exactly_once() {
        let questions = parse("1. Q\na) Tom & Jerry <said> \"hi\" 'there'");
        let xml = serialize(&questions, false, &ImageTable::new());
        assert!(xml.contains("Tom &amp; Jerry &lt;said&gt; &quot;hi&quot; &apos;there&apos;"));
        assert!(!xml.contains("&amp;amp;"));
        assert!(!xml.contains("&amp;lt;"));
        assert!(!xml.contains("<said>"));
    }

    #[test]
    fn image_placeholder_substituted() {
        let mut images = ImageTable::new();
        images.insert("imagem1", "data:image/png;base64,X").unwrap();
        let questions = parse("1. See [imagem1] above\na) Yes");
        let xml = serialize(&questions, false, &images);
        assert!(xml.contains(r#"<img src="data:image/png;base64,X" /><br>"#));
        assert!(!xml.contains("[imagem1]"));
    }

    #[test]
    fn image_placeholder_kept_without_table_entry() {
        let questions = parse("1. See [imagem1] above\na) Yes");
        let xml = serialize(&questions, false, &ImageTable::new());
        assert!(xml.contains("See [imagem1] above"));
    }

    #[test]
    fn raw_question_html_cannot_close_cdata() {
        let xml = serialize(&[question("1.", "a ]]> b", None)], false, &ImageTable::new());
        assert!(xml.contains("<![CDATA[<p>a ]]]]><![CDATA[> b</p>]]>"));
    }
}
