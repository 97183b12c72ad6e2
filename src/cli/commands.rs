use crate::app::{AppContext, Result};
use crate::cli::VerseFormat;
use crate::domain::{Chapter, Verse};

pub async fn list_chapters(ctx: &AppContext) -> Result<()> {
    let chapters = ctx.repository.list_chapters().await?;

    for chapter in chapters {
        println!(
            "{:>2}. {} ({} verses)\n    {}",
            chapter.chapter_number,
            chapter.display_title(),
            chapter.verses_count,
            chapter.name_transliterated
        );
    }

    Ok(())
}

pub async fn show_chapter(ctx: &AppContext, number: u8) -> Result<()> {
    let chapter = ctx.repository.get_chapter(number).await?;
    print_chapter(&chapter);
    Ok(())
}

pub async fn list_verses(ctx: &AppContext, chapter: u8) -> Result<()> {
    let batch = ctx.repository.fetch_chapter_verses(chapter).await?;

    for verse in &batch.verses {
        print_verse_summary(verse);
    }

    if !batch.skipped.is_empty() {
        let skipped: Vec<String> = batch.skipped.iter().map(|r| r.to_string()).collect();
        eprintln!("Could not load {} verses: {}", skipped.len(), skipped.join(", "));
    }

    Ok(())
}

pub async fn show_verse(
    ctx: &AppContext,
    chapter: u8,
    verse: u16,
    format: VerseFormat,
) -> Result<()> {
    let verse = ctx.repository.get_verse(chapter, verse).await?;
    if let Some(text) = render(&verse, format) {
        println!("{}", text);
        return Ok(());
    }
    print_verse(&verse, ctx.bookmarks.is_bookmarked(verse.chapter_number, verse.verse_number));

    let here = verse.verse_ref();
    if let Some(previous) = here.previous() {
        println!("Previous: {}", previous);
    }
    // Verse counts come from the chapter record; skip the hint if it's unavailable
    if let Ok(meta) = ctx.repository.chapter_metadata(here.chapter).await {
        if let Some(next) = here.next(meta.verses_count) {
            println!("Next: {}", next);
        }
    }

    Ok(())
}

pub async fn random_verse(ctx: &AppContext) -> Result<()> {
    let verse = ctx.repository.get_random_verse().await?;
    print_verse(&verse, ctx.bookmarks.is_bookmarked(verse.chapter_number, verse.verse_number));
    Ok(())
}

pub async fn daily_verse(ctx: &AppContext, format: VerseFormat) -> Result<()> {
    let verse = ctx.daily.get_or_refresh(&ctx.repository).await?;
    if let Some(text) = render(&verse, format) {
        println!("{}", text);
        return Ok(());
    }

    println!("Verse of the day: {}\n", verse.citation());
    println!("{}\n", verse.sanskrit_text);
    if let Some(translation) = verse.primary_translation() {
        println!("\"{}\"\n  - {}", translation.description, translation.author_name);
    }

    Ok(())
}

pub fn toggle_bookmark(ctx: &AppContext, chapter: u8, verse: u16) -> Result<()> {
    if ctx.bookmarks.toggle(chapter, verse)? {
        println!("Bookmarked {}.{}", chapter, verse);
    } else {
        println!("Removed bookmark {}.{}", chapter, verse);
    }
    Ok(())
}

pub async fn list_bookmarks(ctx: &AppContext, resolve: bool) -> Result<()> {
    let refs = ctx.bookmarks.list();

    if refs.is_empty() {
        println!("No saved verses");
        return Ok(());
    }

    if !resolve {
        for verse_ref in refs {
            println!("{}", verse_ref);
        }
        return Ok(());
    }

    let batch = ctx.repository.get_verses(&refs).await;
    println!(
        "You have {} saved verse{}",
        batch.verses.len(),
        if batch.verses.len() == 1 { "" } else { "s" }
    );
    for verse in &batch.verses {
        print_verse_summary(verse);
    }
    for verse_ref in &batch.skipped {
        eprintln!("  ! {} could not be loaded", verse_ref);
    }

    Ok(())
}

pub async fn search(ctx: &AppContext, query: &str, chapters: &[u8]) -> Result<()> {
    let results = ctx.repository.search_verses(query, chapters).await?;

    if results.is_empty() {
        println!("No verses match \"{}\"", query.trim());
        return Ok(());
    }

    println!("{} verses match \"{}\"", results.len(), query.trim());
    for verse in &results {
        print_verse_summary(verse);
    }

    Ok(())
}

/// Plain-text forms of a verse; `None` means the full listing.
fn render(verse: &Verse, format: VerseFormat) -> Option<String> {
    match format {
        VerseFormat::Full => None,
        VerseFormat::Share => Some(verse.share_text()),
        VerseFormat::Copy => Some(verse.copy_text()),
    }
}

fn print_chapter(chapter: &Chapter) {
    println!("Chapter {}: {}", chapter.chapter_number, chapter.display_title());
    if !chapter.name.is_empty() {
        println!("{}", chapter.name);
    }
    println!("{} · {} verses\n", chapter.name_transliterated, chapter.verses_count);
    println!("{}", chapter.summary_english);
    if let Some(hindi) = &chapter.summary_hindi {
        println!("\n{}", hindi);
    }
}

fn print_verse_summary(verse: &Verse) {
    let translation = verse
        .primary_translation()
        .map(|t| t.description.as_str())
        .unwrap_or("(no translation)");
    println!("{:>6}  {}", verse.verse_ref().to_string(), translation);
}

fn print_verse(verse: &Verse, bookmarked: bool) {
    let marker = if bookmarked { " [saved]" } else { "" };
    println!("{}{}\n", verse.citation(), marker);
    println!("{}\n", verse.sanskrit_text);
    if !verse.transliteration.is_empty() {
        println!("{}\n", verse.transliteration);
    }

    println!("Translations:");
    for t in &verse.translations {
        println!("  [{}] {} ({}):\n    {}", t.id, t.author_name, t.language, t.description);
    }

    if let Some(commentaries) = &verse.commentaries {
        println!("\nCommentaries:");
        for c in commentaries {
            println!("  [{}] {} ({}):\n    {}", c.id, c.author_name, c.language, c.description);
        }
    }
}
