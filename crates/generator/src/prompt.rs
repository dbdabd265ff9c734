//! Prompt assembly for the game-generation model.
//!
//! The instruction block pins down the output contract the rest of the
//! pipeline depends on: a single self-contained HTML file, all content
//! inside the `game-container` div, wrapped in a fenced ```html block.

/// Fixed instruction preamble sent with every generation request.
const INSTRUCTIONS: &str = r#"Create a simple, interactive HTML5 game based on this prompt. The game should fit in a 400x400 pixel area, be fully playable, and use keyboard controls if necessary. Provide a complete HTML file including internal CSS and JavaScript. The game must be entirely self-contained within this single HTML file.

Important:
1. Place all game content (canvas, divs, etc.) inside a div with id="game-container".
2. The game-container div should have a width of 600px and a height of 400px.
3. Include all necessary CSS within a <style> tag in the <head> section.
4. Include all JavaScript within a <script> tag at the end of the <body> section.
5. Ensure that the game is fully functional and playable when this HTML is loaded in a browser.
6. Always wrap your entire HTML code (including <!DOCTYPE html>) in ```html and ``` tags.

Here's a basic structure to follow:

```html
<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>Game Title</title>
    <style>
        /* Your CSS here */
        #game-container {
            width: 600px;
            height: 400px;
            /* Other styles */
        }
    </style>
</head>
<body>
    <div id="game-container">
        <!-- Your game content here -->
    </div>
    <script>
        // Your JavaScript here
    </script>
</body>
</html>
```"#;

/// Build the full prompt for one generation call.
///
/// Always includes the baseline document as the code to iterate upon, and
/// tells the model where the owner's uploaded images are reachable.
pub fn build_prompt(prompt: &str, baseline_html: &str, owner_key: &str) -> String {
    format!(
        "{INSTRUCTIONS}\n\n\
         Images uploaded by the user are available at uploads/{owner_key}/<filename> \
         and may be referenced from the game if the prompt asks for them.\n\n\
         Here is the current game code to iterate upon:\n\n\
         {baseline_html}\n\n\
         Please modify this code based on the new prompt, ensuring to provide a \
         complete, self-contained HTML file:\n\n\
         New prompt: {prompt}"
    )
}
